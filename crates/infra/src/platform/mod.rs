//! Platform gateway implementations

pub mod auth;
pub mod rest;

pub use auth::GoTrueClient;
pub use rest::PostgrestClient;
