//! Direct database access

pub mod provision;

pub use provision::{ProvisionedUser, TestUserProvisioner};
