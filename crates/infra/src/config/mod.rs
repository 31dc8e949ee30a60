//! Configuration loading and management
//!
//! This module resolves platform and database settings from environment
//! variables, config files and the local status command.

pub mod loader;
pub mod status;

// Re-export commonly used items
pub use loader::{
    load_file, platform_from_env, probe_config_paths, process_env, resolve_database,
    resolve_platform, EnvLookup, KeyRequirement,
};
pub use status::{parse_status, NoStatusProbe, NpxStatusProbe, StatusProbe};
