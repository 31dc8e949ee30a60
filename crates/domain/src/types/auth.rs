//! Identity types for the auth gateway and REST calls

use serde::{Deserialize, Serialize};

/// Session returned by sign-up or password sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    /// Auth identity id (the JWT `sub`)
    pub user_id: String,
}

/// Header material for a REST call: `apikey` plus optional bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub bearer: Option<String>,
}

impl Credentials {
    /// Service-role identity: the key doubles as bearer token.
    pub fn service(service_key: &str) -> Self {
        Self { api_key: service_key.to_string(), bearer: Some(service_key.to_string()) }
    }

    /// A signed-in user acting through the public key.
    pub fn user(anon_key: &str, session: &AuthSession) -> Self {
        Self { api_key: anon_key.to_string(), bearer: Some(session.access_token.clone()) }
    }

    /// Public key only, no bearer.
    pub fn anonymous(anon_key: &str) -> Self {
        Self { api_key: anon_key.to_string(), bearer: None }
    }
}

// Keys and tokens must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
