//! `dancefloor scale-test`
//!
//! Seeds through a child `dancefloor seed --emit-json`, then hands the seeded
//! users to the frontend test runner through the environment.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use dancefloor_core::ProgressReporter;
use dancefloor_domain::constants::{
    ENV_SCALE_SEEDED_USERS_JSON, ENV_SCALE_TEST, ENV_SCALE_WINDOWS_PER_USER,
};
use dancefloor_infra::process::{parse_seed_output, run_captured, run_inherited, CommandLine};
use tracing::info;

use crate::cli::{GlobalArgs, LogFormat, ScaleTestArgs};
use crate::context::AppContext;
use crate::reporter::StdoutReporter;

pub fn run(ctx: &AppContext, args: &ScaleTestArgs) -> anyhow::Result<ExitCode> {
    let exe = std::env::current_exe().context("locating the dancefloor executable")?;
    let seed_args = seed_invocation(&ctx.global, args);
    let reporter = StdoutReporter;

    for line in seeding_banner(&exe, &seed_args) {
        reporter.line(&line);
    }
    let output = run_captured(exe.as_os_str(), &seed_args, "Seeding")?;

    let users = parse_seed_output(&output.stdout)?;
    info!(users = users.len(), "seeded users parsed");
    let users_json = serde_json::to_string(&users).context("serializing seeded users")?;

    let frontend_dir = std::env::current_dir()
        .context("reading the working directory")?
        .join(&args.frontend_dir);
    let command = CommandLine::parse(&args.test_command)?
        .with_args([args.pattern.as_str(), "--no-coverage"]);

    for line in runner_banner(&frontend_dir, &command) {
        reporter.line(&line);
    }
    run_inherited(
        &command,
        &frontend_dir,
        &scale_env(users_json, args.windows_per_user),
        "Scale tests",
    )?;

    reporter.line("\n✅ Scale integration tests completed successfully.");
    Ok(ExitCode::SUCCESS)
}

fn seeding_banner(exe: &Path, seed_args: &[String]) -> [String; 2] {
    [
        "=== Seeding database via `dancefloor seed` ===".to_string(),
        format!("Command: {} {}", exe.display(), seed_args.join(" ")),
    ]
}

fn runner_banner(frontend_dir: &Path, command: &CommandLine) -> [String; 3] {
    [
        "=== Running scale integration tests ===".to_string(),
        format!("Working directory: {}", frontend_dir.display()),
        format!("Command: {}", command.display()),
    ]
}

/// Arguments for the child seed run. Global flags are forwarded so the child
/// resolves the same configuration.
fn seed_invocation(global: &GlobalArgs, args: &ScaleTestArgs) -> Vec<String> {
    let mut argv = vec![
        "seed".to_string(),
        "--extra-users".to_string(),
        args.extra_users.to_string(),
        "--windows-per-user".to_string(),
        args.windows_per_user.to_string(),
        "--emit-json".to_string(),
        "--http-attempts".to_string(),
        global.http_attempts.to_string(),
        "--http-timeout".to_string(),
        global.http_timeout_secs.to_string(),
    ];
    if let Some(config) = &global.config {
        argv.push("--config".to_string());
        argv.push(config.display().to_string());
    }
    if global.log_format == LogFormat::Json {
        argv.push("--log-format".to_string());
        argv.push("json".to_string());
    }
    if global.no_status_probe {
        argv.push("--no-status-probe".to_string());
    }
    argv
}

fn scale_env(users_json: String, windows_per_user: usize) -> Vec<(String, String)> {
    vec![
        (ENV_SCALE_TEST.to_string(), "1".to_string()),
        (ENV_SCALE_SEEDED_USERS_JSON.to_string(), users_json),
        (ENV_SCALE_WINDOWS_PER_USER.to_string(), windows_per_user.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn scale_args() -> ScaleTestArgs {
        ScaleTestArgs {
            extra_users: 50,
            windows_per_user: 3,
            pattern: "p".into(),
            frontend_dir: PathBuf::from("frontend"),
            test_command: "npm test --".into(),
        }
    }

    #[test]
    fn child_seed_gets_scale_flags() {
        let global = GlobalArgs {
            config: None,
            log_format: LogFormat::Text,
            http_attempts: 1,
            http_timeout_secs: 30,
            no_status_probe: false,
        };
        assert_eq!(
            seed_invocation(&global, &scale_args()),
            [
                "seed",
                "--extra-users",
                "50",
                "--windows-per-user",
                "3",
                "--emit-json",
                "--http-attempts",
                "1",
                "--http-timeout",
                "30"
            ]
        );
    }

    #[test]
    fn child_seed_arguments_parse_back() {
        let global = GlobalArgs {
            config: Some(PathBuf::from("dancefloor.toml")),
            log_format: LogFormat::Json,
            http_attempts: 2,
            http_timeout_secs: 90,
            no_status_probe: true,
        };
        let argv = seed_invocation(&global, &scale_args());
        let cli = Cli::try_parse_from(std::iter::once("dancefloor".to_string()).chain(argv))
            .unwrap();

        let Command::Seed(seed) = cli.command else { panic!("expected seed") };
        assert_eq!(seed.extra_users, 50);
        assert_eq!(seed.windows_per_user, Some(3));
        assert!(seed.emit_json);
        assert_eq!(cli.global.config, Some(PathBuf::from("dancefloor.toml")));
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert_eq!(cli.global.http_attempts, 2);
        assert_eq!(cli.global.http_timeout_secs, 90);
        assert!(cli.global.no_status_probe);
    }

    #[test]
    fn banners_name_commands_and_directory() {
        let seed_args = ["seed".to_string(), "--emit-json".to_string()];
        let seeding = seeding_banner(Path::new("/bin/dancefloor"), &seed_args);
        assert_eq!(seeding[1], "Command: /bin/dancefloor seed --emit-json");

        let command = CommandLine::parse("npm test --").unwrap().with_args(["p", "--no-coverage"]);
        let runner = runner_banner(Path::new("frontend"), &command);
        assert_eq!(runner[0], "=== Running scale integration tests ===");
        assert_eq!(runner[1], "Working directory: frontend");
        assert_eq!(runner[2], "Command: npm test -- p --no-coverage");
    }

    #[test]
    fn environment_for_test_runner() {
        let env = scale_env("[]".into(), 2);
        assert_eq!(
            env,
            [
                ("SCALE_TEST".to_string(), "1".to_string()),
                ("SCALE_SEEDED_USERS_JSON".to_string(), "[]".to_string()),
                ("SCALE_WINDOWS_PER_USER".to_string(), "2".to_string()),
            ]
        );
    }
}
