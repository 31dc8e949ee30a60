//! API-based seeding

pub mod extra_users;
pub mod history;
pub mod service;

pub use extra_users::generate_extra_users;
pub use history::{plan_history, PlannedSession};
pub use service::{SeedOptions, SeedReport, SeedService, Verification, VerifiedProfile};
