//! Configuration loader
//!
//! Resolves platform and database settings for every entry point.
//!
//! ## Loading Strategy
//! For each platform field, the first source with a value wins:
//! 1. Environment variables
//! 2. A config file (`--config`, or `dancefloor.{toml,json}` in the working
//!    directory or its parent)
//! 3. The local status command, only when a required key is still missing
//! 4. The default local URL
//!
//! ## Environment Variables
//! - `SUPABASE_URL` / `NEXT_PUBLIC_SUPABASE_URL`: platform base URL
//! - `SUPABASE_ANON_KEY` / `NEXT_PUBLIC_SUPABASE_ANON_KEY`: public API key
//! - `SUPABASE_SERVICE_ROLE_KEY`: RLS-bypassing key for the seeder
//! - `DANCEFLOOR_DB_HOST`, `DANCEFLOOR_DB_PORT`, `DANCEFLOOR_DB_NAME`,
//!   `DANCEFLOOR_DB_USER`, `DANCEFLOOR_DB_PASSWORD`: direct database access

use std::path::{Path, PathBuf};

use dancefloor_domain::{
    normalize_url, DanceFloorError, DatabaseConfig, FileConfig, PlatformConfig, PlatformSettings,
    Result,
};
use tracing::{debug, info};

use super::status::{parse_status, StatusProbe};
use crate::errors::InfraError;

/// Looks up one environment variable.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads the process environment. Empty values count as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Which API keys an entry point cannot run without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRequirement {
    /// Anon key only (RLS smoke test)
    Anon,
    /// Anon and service role keys (seeder)
    AnonAndService,
}

impl KeyRequirement {
    fn satisfied_by(self, settings: &PlatformSettings) -> bool {
        match self {
            Self::Anon => settings.anon_key.is_some(),
            Self::AnonAndService => settings.has_all_keys(),
        }
    }

    fn missing_message(self) -> &'static str {
        match self {
            Self::Anon => {
                "Missing SUPABASE_ANON_KEY env var. Run `npx supabase status` and copy the anon key."
            }
            Self::AnonAndService => {
                "Unable to resolve platform keys. Set SUPABASE_ANON_KEY and SUPABASE_SERVICE_ROLE_KEY."
            }
        }
    }
}

/// Platform settings present in the environment.
pub fn platform_from_env(env: EnvLookup<'_>) -> PlatformSettings {
    PlatformSettings {
        url: env("SUPABASE_URL").or_else(|| env("NEXT_PUBLIC_SUPABASE_URL")),
        anon_key: env("SUPABASE_ANON_KEY").or_else(|| env("NEXT_PUBLIC_SUPABASE_ANON_KEY")),
        service_role_key: env("SUPABASE_SERVICE_ROLE_KEY"),
    }
}

/// Merge the sources into a [`PlatformConfig`].
///
/// The status probe runs only when env and file leave a required key unset.
/// Its URL is used only when neither env nor file named one.
///
/// # Errors
/// Returns `DanceFloorError::Config` when a required key is still missing.
pub fn resolve_platform(
    env: EnvLookup<'_>,
    file: Option<&FileConfig>,
    probe: &dyn StatusProbe,
    requirement: KeyRequirement,
) -> Result<PlatformConfig> {
    let file_settings = file.map(|f| f.platform.clone()).unwrap_or_default();
    let mut settings = platform_from_env(env).or(file_settings);

    if !requirement.satisfied_by(&settings) {
        debug!("platform keys incomplete, probing status command");
        if let Some(output) = probe.status_output() {
            settings = settings.or(parse_status(&output));
        }
    }

    if !requirement.satisfied_by(&settings) {
        return Err(DanceFloorError::Config(requirement.missing_message().to_string()));
    }

    let PlatformSettings { url, anon_key, service_role_key } = settings;
    let config = PlatformConfig {
        url: normalize_url(url.as_deref()),
        anon_key: anon_key.unwrap_or_default(),
        service_role_key,
    };
    info!(url = %config.url, "platform configuration resolved");
    Ok(config)
}

/// Database settings: config file table (or defaults), overridden by env.
///
/// # Errors
/// Returns `DanceFloorError::Config` for a non-numeric port.
pub fn resolve_database(env: EnvLookup<'_>, file: Option<&FileConfig>) -> Result<DatabaseConfig> {
    let mut config = file.and_then(|f| f.database.clone()).unwrap_or_default();

    if let Some(host) = env("DANCEFLOOR_DB_HOST") {
        config.host = host;
    }
    if let Some(port) = env("DANCEFLOOR_DB_PORT") {
        config.port = port
            .trim()
            .parse()
            .map_err(|e| DanceFloorError::Config(format!("Invalid database port '{port}': {e}")))?;
    }
    if let Some(database) = env("DANCEFLOOR_DB_NAME") {
        config.database = database;
    }
    if let Some(user) = env("DANCEFLOOR_DB_USER") {
        config.user = user;
    }
    if let Some(password) = env("DANCEFLOOR_DB_PASSWORD") {
        config.password = password;
    }

    Ok(config)
}

/// Load the config file.
///
/// An explicit `path` must exist. Without one, the standard locations are
/// probed and a missing file is not an error.
///
/// # Errors
/// Returns `DanceFloorError::Config` if the explicit file is missing or any
/// file fails to parse.
pub fn load_file(path: Option<&Path>) -> Result<Option<FileConfig>> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DanceFloorError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p.to_path_buf()
        }
        None => match probe_config_paths() {
            Some(found) => found,
            None => return Ok(None),
        },
    };

    info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DanceFloorError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path).map(Some)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<FileConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DanceFloorError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(DanceFloorError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing `dancefloor.{toml,json}` in the working directory or its
/// parent.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(dir: &Path) -> Option<PathBuf> {
    let candidates = [
        dir.join("dancefloor.toml"),
        dir.join("dancefloor.json"),
        dir.join("../dancefloor.toml"),
        dir.join("../dancefloor.json"),
    ];
    candidates.into_iter().find(|path| path.exists())
}
