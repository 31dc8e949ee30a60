//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dancefloor_domain::constants::{
    DEFAULT_HISTORY_SESSIONS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_RNG_SEED, DEFAULT_SCALE_EXTRA_USERS, DEFAULT_SCALE_PATTERN,
    DEFAULT_SCALE_WINDOWS_PER_USER,
};
use dancefloor_domain::fixtures::{
    RLS_ADMIN_EMAIL, RLS_ADMIN_PASSWORD, RLS_USER_EMAIL, RLS_USER_PASSWORD,
};

#[derive(Debug, Parser)]
#[command(name = "dancefloor", version)]
#[command(about = "Seed, scale-test and RLS smoke-test a local dance practice platform")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Config file (TOML or JSON). Defaults to `dancefloor.{toml,json}` in
    /// the working directory or its parent.
    #[arg(long, global = true, env = "DANCEFLOOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Total attempts per HTTP call (1 = no retry)
    #[arg(
        long,
        global = true,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    pub http_attempts: u32,

    /// Seconds before an HTTP call is abandoned
    #[arg(
        long = "http-timeout",
        global = true,
        default_value_t = DEFAULT_HTTP_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub http_timeout_secs: u64,

    /// Never run `npx supabase status` to discover missing keys
    #[arg(long, global = true)]
    pub no_status_probe: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the test account directly in the local Postgres
    CreateTestUser(CreateTestUserArgs),
    /// Seed the location, users, preferences and history via the platform APIs
    Seed(SeedArgs),
    /// Seed at scale, then run the frontend scale suite against the result
    ScaleTest(ScaleTestArgs),
    /// Check row-level security policies with two real accounts
    RlsSmoke(RlsSmokeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CreateTestUserArgs {
    /// Email of the account (default: test@example.com)
    #[arg(long)]
    pub email: Option<String>,

    /// Password of the account (default: test123)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SeedArgs {
    /// Generated users to add after the fixture users
    #[arg(long, default_value_t = 0)]
    pub extra_users: usize,

    /// Windows per generated user (default: 2)
    #[arg(long)]
    pub windows_per_user: Option<usize>,

    /// Completed past sessions to create among the fixture users
    #[arg(long, default_value_t = DEFAULT_HISTORY_SESSIONS)]
    pub history_sessions: usize,

    /// Seed for generated users' window selection
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    pub rng_seed: u64,

    /// Print the seeded users as a JSON array on the last stdout line
    #[arg(long)]
    pub emit_json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ScaleTestArgs {
    /// Generated users to seed
    #[arg(long, default_value_t = DEFAULT_SCALE_EXTRA_USERS)]
    pub extra_users: usize,

    /// Maximum windows per generated user
    #[arg(long, default_value_t = DEFAULT_SCALE_WINDOWS_PER_USER)]
    pub windows_per_user: usize,

    /// Test pattern passed to the test command
    #[arg(long, default_value = DEFAULT_SCALE_PATTERN)]
    pub pattern: String,

    /// Frontend directory, relative to the working directory
    #[arg(long, default_value = "frontend")]
    pub frontend_dir: PathBuf,

    /// Test runner command line
    #[arg(long, default_value = "npm test --")]
    pub test_command: String,
}

#[derive(Debug, Clone, Args)]
pub struct RlsSmokeArgs {
    #[arg(long, env = "ADMIN_EMAIL", default_value = RLS_ADMIN_EMAIL)]
    pub admin_email: String,

    #[arg(long, env = "ADMIN_PASSWORD", default_value = RLS_ADMIN_PASSWORD, hide_env_values = true)]
    pub admin_password: String,

    #[arg(long, env = "USER_EMAIL", default_value = RLS_USER_EMAIL)]
    pub user_email: String,

    #[arg(long, env = "USER_PASSWORD", default_value = RLS_USER_PASSWORD, hide_env_values = true)]
    pub user_password: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dancefloor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_defaults() {
        let cli = parse(&["seed"]);
        let Command::Seed(args) = cli.command else { panic!("expected seed") };
        assert_eq!(args.extra_users, 0);
        assert_eq!(args.windows_per_user, None);
        assert_eq!(args.history_sessions, 3);
        assert_eq!(args.rng_seed, 42);
        assert!(!args.emit_json);
        assert_eq!(cli.global.http_attempts, 1);
        assert_eq!(cli.global.http_timeout_secs, 30);
        assert_eq!(cli.global.log_format, LogFormat::Text);
    }

    #[test]
    fn seed_flags_and_globals_after_subcommand() {
        let cli = parse(&[
            "seed",
            "--extra-users",
            "5",
            "--windows-per-user",
            "1",
            "--emit-json",
            "--log-format",
            "json",
            "--http-attempts",
            "3",
        ]);
        let Command::Seed(args) = cli.command else { panic!("expected seed") };
        assert_eq!(args.extra_users, 5);
        assert_eq!(args.windows_per_user, Some(1));
        assert!(args.emit_json);
        assert_eq!(cli.global.log_format, LogFormat::Json);
        assert_eq!(cli.global.http_attempts, 3);
    }

    #[test]
    fn scale_test_defaults() {
        let Command::ScaleTest(args) = parse(&["scale-test"]).command else {
            panic!("expected scale-test")
        };
        assert_eq!(args.extra_users, 200);
        assert_eq!(args.windows_per_user, 2);
        assert_eq!(args.pattern, "src/__tests__/matches-.*integration.test.ts");
        assert_eq!(args.frontend_dir, PathBuf::from("frontend"));
        assert_eq!(args.test_command, "npm test --");
    }

    #[test]
    fn create_test_user_overrides() {
        let Command::CreateTestUser(args) =
            parse(&["create-test-user", "--email", "me@x.com"]).command
        else {
            panic!("expected create-test-user")
        };
        assert_eq!(args.email.as_deref(), Some("me@x.com"));
        assert_eq!(args.password, None);
    }

    #[test]
    fn rls_identities_from_flags() {
        let Command::RlsSmoke(args) =
            parse(&["rls-smoke", "--user-email", "bob@example.com", "--user-password", "bob123"])
                .command
        else {
            panic!("expected rls-smoke")
        };
        assert_eq!(args.user_email, "bob@example.com");
        assert_eq!(args.user_password, "bob123");
    }

    #[test]
    fn zero_http_attempts_rejected() {
        assert!(Cli::try_parse_from(["dancefloor", "--http-attempts", "0", "seed"]).is_err());
    }

    #[test]
    fn http_timeout_flag() {
        assert_eq!(parse(&["rls-smoke", "--http-timeout", "5"]).global.http_timeout_secs, 5);
        assert!(Cli::try_parse_from(["dancefloor", "--http-timeout", "0", "seed"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["dancefloor"]).is_err());
    }
}
