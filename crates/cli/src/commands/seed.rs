//! `dancefloor seed`

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use dancefloor_core::{ProgressReporter, SeedOptions, SeedService};
use dancefloor_domain::SeededUser;
use dancefloor_infra::config::KeyRequirement;
use tracing::info;

use crate::cli::SeedArgs;
use crate::context::AppContext;
use crate::reporter::StdoutReporter;

const RULE: &str = "============================================================";

pub async fn run(ctx: &AppContext, args: &SeedArgs) -> anyhow::Result<ExitCode> {
    let platform = ctx.platform(KeyRequirement::AnonAndService)?;
    let service_key = platform.require_service_key()?;

    let reporter = Arc::new(StdoutReporter);
    for line in banner(&platform.url) {
        reporter.line(&line);
    }

    let (auth, rest) = ctx.gateways(&platform);
    let service = SeedService::new(auth, rest, service_key, reporter);
    let report = service.run(&options(args)).await?;
    info!(
        users = report.users.len(),
        sessions = report.session_ids.len(),
        "seeding finished"
    );

    if args.emit_json {
        // Must stay the last stdout line: `scale-test` parses it.
        println!("{}", seeded_users_json(&report.users)?);
    }
    Ok(ExitCode::SUCCESS)
}

fn banner(url: &str) -> [String; 4] {
    [
        RULE.to_string(),
        "Seeding via Supabase APIs".to_string(),
        RULE.to_string(),
        format!("API: {url}"),
    ]
}

fn options(args: &SeedArgs) -> SeedOptions {
    SeedOptions {
        extra_users: args.extra_users,
        windows_per_user: args.windows_per_user,
        history_sessions: args.history_sessions,
        rng_seed: args.rng_seed,
    }
}

/// Compact, single-line JSON array.
fn seeded_users_json(users: &[SeededUser]) -> anyhow::Result<String> {
    serde_json::to_string(users).context("serializing seeded users")
}
