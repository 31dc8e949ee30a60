//! Composition root: configuration plus the concrete gateways

use std::sync::Arc;
use std::time::Duration;

use dancefloor_core::{AuthGateway, RestGateway};
use dancefloor_domain::{DatabaseConfig, FileConfig, PlatformConfig, Result};
use dancefloor_infra::config::{
    load_file, process_env, resolve_database, resolve_platform, KeyRequirement, NoStatusProbe,
    NpxStatusProbe, StatusProbe,
};
use dancefloor_infra::{GoTrueClient, HttpClient, PostgrestClient};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Type alias for the auth gateway trait object
type DynAuthGateway = dyn AuthGateway + 'static;

/// Type alias for the REST gateway trait object
type DynRestGateway = dyn RestGateway + 'static;

/// Everything a subcommand needs to talk to the platform
pub struct AppContext {
    pub global: GlobalArgs,
    file: Option<FileConfig>,
    http: HttpClient,
}

impl AppContext {
    pub fn new(global: GlobalArgs) -> Result<Self> {
        let file = load_file(global.config.as_deref())?;
        let http = HttpClient::builder()
            .max_attempts(global.http_attempts as usize)
            .timeout(Duration::from_secs(global.http_timeout_secs))
            .build()?;
        debug!(
            has_file = file.is_some(),
            attempts = http.max_attempts(),
            timeout_secs = global.http_timeout_secs,
            "context ready"
        );
        Ok(Self { global, file, http })
    }

    fn status_probe(&self) -> Box<dyn StatusProbe> {
        if self.global.no_status_probe {
            Box::new(NoStatusProbe)
        } else {
            Box::new(NpxStatusProbe)
        }
    }

    pub fn platform(&self, requirement: KeyRequirement) -> Result<PlatformConfig> {
        let probe = self.status_probe();
        resolve_platform(&process_env, self.file.as_ref(), probe.as_ref(), requirement)
    }

    pub fn database(&self) -> Result<DatabaseConfig> {
        resolve_database(&process_env, self.file.as_ref())
    }

    pub fn gateways(&self, platform: &PlatformConfig) -> (Arc<DynAuthGateway>, Arc<DynRestGateway>) {
        let auth: Arc<DynAuthGateway> = Arc::new(GoTrueClient::new(self.http.clone(), platform));
        let rest: Arc<DynRestGateway> = Arc::new(PostgrestClient::new(self.http.clone(), platform));
        (auth, rest)
    }
}
