//! `dancefloor create-test-user`

use std::process::ExitCode;
use std::sync::Arc;

use dancefloor_core::ProgressReporter;
use dancefloor_domain::fixtures::TestAccount;
use dancefloor_domain::DanceFloorError;
use dancefloor_infra::{ProvisionedUser, TestUserProvisioner};
use tracing::warn;

use crate::cli::CreateTestUserArgs;
use crate::context::AppContext;
use crate::reporter::StdoutReporter;

const RULE: &str = "==================================================";

pub async fn run(ctx: &AppContext, args: &CreateTestUserArgs) -> anyhow::Result<ExitCode> {
    let database = ctx.database()?;
    let account = account(args);
    let reporter = Arc::new(StdoutReporter);
    let provisioner = TestUserProvisioner::new(database, reporter.clone());

    match provisioner.provision(&account).await {
        Ok(user) => {
            for line in summary(&account, &user) {
                reporter.line(&line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(DanceFloorError::Network(message)) => {
            warn!(%message, "database unreachable");
            reporter.line(&format!("✗ {message}"));
            reporter.line("\nMake sure Supabase is running:");
            reporter.line("  npx supabase start");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn account(args: &CreateTestUserArgs) -> TestAccount {
    let defaults = TestAccount::default();
    TestAccount {
        email: args.email.clone().unwrap_or(defaults.email),
        password: args.password.clone().unwrap_or(defaults.password),
        ..defaults
    }
}

fn summary(account: &TestAccount, user: &ProvisionedUser) -> Vec<String> {
    vec![
        format!("\n{RULE}"),
        "✓ Test user created successfully!".to_string(),
        RULE.to_string(),
        format!("Email: {}", account.email),
        format!("Password: {}", account.password),
        format!("Auth User ID: {}", user.auth_user_id),
        format!("Profile ID: {}", user.profile_id),
        RULE.to_string(),
    ]
}
