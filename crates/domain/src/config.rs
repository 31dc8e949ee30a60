//! Configuration structures
//!
//! Plain data: resolution from environment, files and the platform status
//! command lives in `dancefloor-infra::config`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_PORT, DEFAULT_DB_USER,
    DEFAULT_PLATFORM_URL,
};
use crate::errors::{DanceFloorError, Result};

/// Connection parameters for the hosted platform's HTTP endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL without trailing slash (e.g. `http://127.0.0.1:54321`)
    pub url: String,
    /// Public API key, combined with user bearer tokens for RLS-scoped calls
    pub anon_key: String,
    /// Key that bypasses RLS; only the seeder needs it
    pub service_role_key: Option<String>,
}

impl PlatformConfig {
    /// Service role key, or a configuration error naming the variable to set.
    pub fn require_service_key(&self) -> Result<&str> {
        self.service_role_key.as_deref().ok_or_else(|| {
            DanceFloorError::Config(
                "Unable to resolve service role key. Set SUPABASE_SERVICE_ROLE_KEY.".into(),
            )
        })
    }

    /// `{url}/auth/v1`
    pub fn auth_base(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    /// `{url}/rest/v1`
    pub fn rest_base(&self) -> String {
        format!("{}/rest/v1", self.url)
    }
}

/// Partially-resolved platform settings from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
}

impl PlatformSettings {
    /// Fill every unset field from `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            url: self.url.or(other.url),
            anon_key: self.anon_key.or(other.anon_key),
            service_role_key: self.service_role_key.or(other.service_role_key),
        }
    }

    /// True when both API keys are known.
    pub const fn has_all_keys(&self) -> bool {
        self.anon_key.is_some() && self.service_role_key.is_some()
    }
}

/// Direct database connection parameters used by the single-user creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
        }
    }
}

/// On-disk configuration file (`dancefloor.toml` / `dancefloor.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub platform: PlatformSettings,
    pub database: Option<DatabaseConfig>,
}

/// Normalise a platform URL: trim whitespace and trailing slashes, fall back
/// to the local default when empty.
pub fn normalize_url(url: Option<&str>) -> String {
    let trimmed = url.map(str::trim).unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_PLATFORM_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
