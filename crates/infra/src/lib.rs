//! # Dancefloor Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration resolution (env, config file, local status command)
//! - The HTTP client and the auth/REST gateway clients
//! - Direct Postgres provisioning of the test account
//! - Child process execution for the scale test
//!
//! ## Architecture
//! - Implements traits defined in `dancefloor-core`
//! - Contains all "impure" code (network, database, processes)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod platform;
pub mod process;

// Re-export commonly used items
pub use database::{ProvisionedUser, TestUserProvisioner};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use platform::{GoTrueClient, PostgrestClient};
