//! # Dancefloor Domain
//!
//! Data types shared by the seeding and smoke-test tooling.
//!
//! This crate contains:
//! - The error type and `Result` alias
//! - Configuration structures
//! - Row models for the platform's REST resources
//! - Literal fixture data
//!
//! ## Architecture
//! - No dependencies on other dancefloor crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod fixtures;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
