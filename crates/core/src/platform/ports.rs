//! Port interfaces for the hosted platform
//!
//! These traits define the boundary between the seeding/smoke-test flows and
//! the HTTP implementations in `dancefloor-infra`.

use async_trait::async_trait;
use dancefloor_domain::{AuthSession, Credentials, InsertOptions, RestQuery, RestResponse, Result};
use serde_json::Value;

/// Email/password identity endpoint
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Register a new identity.
    ///
    /// Returns `None` when the platform did not hand back a session, which
    /// includes the "already registered" case. Callers fall back to
    /// [`AuthGateway::sign_in`].
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthSession>>;

    /// Password-grant sign-in. Fails with an auth error on any rejection.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;
}

/// Generic REST-over-database access
///
/// Transport failures are errors; HTTP statuses are reported in the
/// [`RestResponse`] so callers can assert allow/deny outcomes.
#[async_trait]
pub trait RestGateway: Send + Sync {
    /// GET `table` with filters
    async fn select(
        &self,
        creds: &Credentials,
        table: &str,
        query: &RestQuery,
    ) -> Result<RestResponse>;

    /// POST one row (object) or many (array)
    async fn insert(
        &self,
        creds: &Credentials,
        table: &str,
        rows: &Value,
        options: &InsertOptions,
    ) -> Result<RestResponse>;

    /// PATCH rows matching `query`
    async fn update(
        &self,
        creds: &Credentials,
        table: &str,
        query: &RestQuery,
        patch: &Value,
    ) -> Result<RestResponse>;
}
