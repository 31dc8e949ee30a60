//! Tracing subscriber setup and error labels

use dancefloor_domain::DanceFloorError;
use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,dancefloor=info";

/// Install the global subscriber. Logs go to stderr so stdout stays
/// reserved for progress lines and the seeder's JSON.
pub fn init(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(err) = installed {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

/// Convert a `DanceFloorError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &DanceFloorError) -> &'static str {
    match error {
        DanceFloorError::Database(_) => "database",
        DanceFloorError::Config(_) => "config",
        DanceFloorError::Network(_) => "network",
        DanceFloorError::Auth(_) => "auth",
        DanceFloorError::NotFound(_) => "not_found",
        DanceFloorError::InvalidInput(_) => "invalid_input",
        DanceFloorError::Rest { .. } => "rest",
        DanceFloorError::Process(_) => "process",
        DanceFloorError::Internal(_) => "internal",
    }
}
