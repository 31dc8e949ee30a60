//! PostgREST client
//!
//! Table access at `{url}/rest/v1/<table>`. Statuses are returned to the
//! caller; only transport failures are errors.

use async_trait::async_trait;
use dancefloor_core::RestGateway;
use dancefloor_domain::{
    Credentials, InsertOptions, PlatformConfig, RestQuery, RestResponse, Result,
};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::http::HttpClient;

/// [`RestGateway`] over the platform's REST endpoint
pub struct PostgrestClient {
    http: HttpClient,
    rest_base: String,
}

impl PostgrestClient {
    pub fn new(http: HttpClient, config: &PlatformConfig) -> Self {
        Self { http, rest_base: config.rest_base() }
    }

    fn request(&self, method: Method, creds: &Credentials, table: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}/{table}", self.rest_base))
            .header("apikey", &creds.api_key)
            .header("Content-Type", "application/json");
        if let Some(bearer) = &creds.bearer {
            builder = builder.bearer_auth(bearer);
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<RestResponse> {
        let (status, body) = self.http.send_for_body(builder).await?;
        debug!(status, "REST response");
        Ok(RestResponse::new(status, body))
    }
}

/// `Prefer` header value for an insert, if any.
fn prefer_header(options: &InsertOptions) -> Option<String> {
    let mut parts = Vec::new();
    if options.return_representation {
        parts.push("return=representation");
    }
    if options.on_conflict.is_some() {
        parts.push("resolution=merge-duplicates");
    }
    (!parts.is_empty()).then(|| parts.join(","))
}

#[async_trait]
impl RestGateway for PostgrestClient {
    #[instrument(skip(self, creds, query))]
    async fn select(
        &self,
        creds: &Credentials,
        table: &str,
        query: &RestQuery,
    ) -> Result<RestResponse> {
        let builder = self.request(Method::GET, creds, table).query(query.params());
        self.execute(builder).await
    }

    #[instrument(skip(self, creds, rows, options), fields(on_conflict = ?options.on_conflict))]
    async fn insert(
        &self,
        creds: &Credentials,
        table: &str,
        rows: &Value,
        options: &InsertOptions,
    ) -> Result<RestResponse> {
        let mut builder = self.request(Method::POST, creds, table).json(rows);
        if let Some(columns) = &options.on_conflict {
            builder = builder.query(&[("on_conflict", columns)]);
        }
        if let Some(prefer) = prefer_header(options) {
            builder = builder.header("Prefer", prefer);
        }
        self.execute(builder).await
    }

    #[instrument(skip(self, creds, query, patch))]
    async fn update(
        &self,
        creds: &Credentials,
        table: &str,
        query: &RestQuery,
        patch: &Value,
    ) -> Result<RestResponse> {
        let builder = self
            .request(Method::PATCH, creds, table)
            .query(query.params())
            .header("Prefer", "return=representation")
            .json(patch);
        self.execute(builder).await
    }
}
