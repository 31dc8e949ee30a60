//! Child processes

pub mod runner;

pub use runner::{parse_seed_output, run_captured, run_inherited, CapturedOutput, CommandLine};
