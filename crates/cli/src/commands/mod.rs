//! Subcommand handlers
//!
//! Each handler returns the process exit code on a completed run; errors
//! bubble up to `main`, which prints them and exits 1.

pub mod create_test_user;
pub mod rls_smoke;
pub mod scale_test;
pub mod seed;

use std::process::ExitCode;

use crate::cli::Command;
use crate::context::AppContext;

pub async fn dispatch(ctx: &AppContext, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::CreateTestUser(args) => create_test_user::run(ctx, &args).await,
        Command::Seed(args) => seed::run(ctx, &args).await,
        Command::ScaleTest(args) => scale_test::run(ctx, &args),
        Command::RlsSmoke(args) => rls_smoke::run(ctx, &args).await,
    }
}
