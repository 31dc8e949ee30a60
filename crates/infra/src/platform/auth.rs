//! GoTrue auth client
//!
//! Email/password sign-up and password-grant sign-in against
//! `{url}/auth/v1`.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use dancefloor_core::AuthGateway;
use dancefloor_domain::{AuthSession, DanceFloorError, PlatformConfig, Result};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::http::HttpClient;

/// [`AuthGateway`] over the platform's auth endpoint
pub struct GoTrueClient {
    http: HttpClient,
    auth_base: String,
    anon_key: String,
}

impl GoTrueClient {
    pub fn new(http: HttpClient, config: &PlatformConfig) -> Self {
        Self { http, auth_base: config.auth_base(), anon_key: config.anon_key.clone() }
    }

    fn post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.http
            .request(Method::POST, format!("{}{path}", self.auth_base))
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(body)
    }
}

#[async_trait]
impl AuthGateway for GoTrueClient {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthSession>> {
        let body = json!({ "email": email, "password": password, "data": {} });
        let (status, payload) = self.http.send_for_body(self.post("/signup", &body)).await?;

        if status != 200 && status != 201 {
            debug!(status, "sign-up declined");
            return Ok(None);
        }

        let user_id = payload.pointer("/user/id").and_then(Value::as_str);
        let token = payload
            .get("access_token")
            .and_then(Value::as_str)
            .or_else(|| payload.pointer("/session/access_token").and_then(Value::as_str));

        Ok(match (token, user_id) {
            (Some(token), Some(user_id)) => Some(AuthSession {
                access_token: token.to_string(),
                user_id: user_id.to_string(),
            }),
            _ => None,
        })
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let body = json!({ "email": email, "password": password });
        let (status, payload) =
            self.http.send_for_body(self.post("/token?grant_type=password", &body)).await?;

        if status == 200 || status == 201 {
            let token = payload.get("access_token").and_then(Value::as_str);
            let user_id = payload
                .pointer("/user/id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| token.and_then(subject_from_jwt));

            if let (Some(token), Some(user_id)) = (token, user_id) {
                return Ok(AuthSession { access_token: token.to_string(), user_id });
            }
        }

        Err(DanceFloorError::Auth(format!("Sign-in failed for {email}: {status} {payload}")))
    }
}

/// `sub` claim of an unverified JWT.
fn subject_from_jwt(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("sub").and_then(Value::as_str).map(str::to_string)
}
