//! # Dancefloor Core
//!
//! Seeding and smoke-test flows written against platform ports.
//!
//! This crate contains:
//! - Port interfaces (traits) for the auth and REST gateways
//! - The seeding service and extra-user generation
//! - The RLS smoke suite
//!
//! ## Architecture Principles
//! - Only depends on `dancefloor-domain`
//! - No database, HTTP, or process code
//! - All external dependencies via traits

pub mod platform;
pub mod reporting;
pub mod rls;
pub mod seed;

pub use platform::ports::{AuthGateway, RestGateway};
pub use reporting::{ProgressReporter, SilentReporter};
pub use rls::{CheckResult, Identity, RlsOutcome, RlsSmokeSuite};
pub use seed::{generate_extra_users, SeedOptions, SeedReport, SeedService};
