//! RLS smoke suite

pub mod suite;

pub use suite::{CheckResult, Identity, RlsOutcome, RlsSmokeSuite};
