//! `dancefloor rls-smoke`

use std::process::ExitCode;
use std::sync::Arc;

use dancefloor_core::{Identity, ProgressReporter, RlsOutcome, RlsSmokeSuite};
use dancefloor_infra::config::KeyRequirement;
use tracing::warn;

use crate::cli::RlsSmokeArgs;
use crate::context::AppContext;
use crate::reporter::StdoutReporter;

pub async fn run(ctx: &AppContext, args: &RlsSmokeArgs) -> anyhow::Result<ExitCode> {
    let platform = ctx.platform(KeyRequirement::Anon)?;
    let reporter = Arc::new(StdoutReporter);
    let (auth, rest) = ctx.gateways(&platform);

    let suite = RlsSmokeSuite::new(auth, rest, &platform.anon_key, reporter.clone())
        .with_admin(Identity::new(&args.admin_email, &args.admin_password))
        .with_user(Identity::new(&args.user_email, &args.user_password));
    let outcome = suite.run().await?;

    for line in summary(&outcome) {
        reporter.line(&line);
    }

    if outcome.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        let failed = outcome.checks.iter().filter(|check| !check.passed).count();
        warn!(failed, "RLS checks failed");
        Ok(ExitCode::FAILURE)
    }
}

fn summary(outcome: &RlsOutcome) -> Vec<String> {
    let mut lines = vec!["\nTest results:".to_string()];
    lines.extend(outcome.checks.iter().map(|check| {
        let marker = if check.passed { "✅" } else { "❌" };
        format!("  {marker} {}", check.name)
    }));
    lines.push(if outcome.all_passed() {
        "\nAll RLS smoke tests passed!".to_string()
    } else {
        "\nSome RLS checks failed. Inspect logs above.".to_string()
    });
    lines
}
