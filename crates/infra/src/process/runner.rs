//! Child process execution for the scale test orchestrator

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus};

use dancefloor_domain::{DanceFloorError, Result, SeededUser};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::InfraError;

/// Captured output of a finished child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A program plus arguments, parsed from a whitespace-separated command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| DanceFloorError::InvalidInput("empty command line".into()))?;
        Ok(Self { program, args: parts.collect() })
    }

    /// The command line with extra arguments appended.
    #[must_use]
    pub fn with_args<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Run `program args` to completion, capturing both streams, then copy them
/// to this process's stdout and stderr.
///
/// A non-zero exit is a [`DanceFloorError::Process`] naming the exit code.
#[instrument(skip(program, args))]
pub fn run_captured(program: &OsStr, args: &[String], label: &str) -> Result<CapturedOutput> {
    debug!(program = ?program, ?args, "spawning captured child");
    let output = Command::new(program).args(args).output().map_err(InfraError::from)?;

    let captured = CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    forward(&captured)?;

    check_status(output.status, label)?;
    Ok(captured)
}

/// Run a command with inherited stdio in `cwd`, adding `envs` to this
/// process's environment.
#[instrument(skip(command, envs), fields(command = %command.display()))]
pub fn run_inherited(
    command: &CommandLine,
    cwd: &Path,
    envs: &[(String, String)],
    label: &str,
) -> Result<()> {
    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .status()
        .map_err(|err| {
            DanceFloorError::Process(format!("failed to start `{}`: {err}", command.display()))
        })?;
    check_status(status, label)
}

fn forward(captured: &CapturedOutput) -> Result<()> {
    std::io::stdout()
        .write_all(captured.stdout.as_bytes())
        .and_then(|()| std::io::stdout().flush())
        .map_err(InfraError::from)?;
    std::io::stderr().write_all(captured.stderr.as_bytes()).map_err(InfraError::from)?;
    Ok(())
}

fn check_status(status: ExitStatus, label: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(match status.code() {
        Some(code) => DanceFloorError::Process(format!("{label} failed with exit code {code}")),
        None => DanceFloorError::Process(format!("{label} was terminated by a signal")),
    })
}

/// Parse the seeder's final stdout line: a JSON array of [`SeededUser`].
pub fn parse_seed_output(stdout: &str) -> Result<Vec<SeededUser>> {
    let last = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| {
            DanceFloorError::Process("Seeding completed but no JSON output was found.".into())
        })?;

    let invalid = |reason: String| {
        DanceFloorError::InvalidInput(format!(
            "Failed to parse JSON output from seed: {reason}\nLast line: {last:?}"
        ))
    };

    let value: Value = serde_json::from_str(last.trim()).map_err(|err| invalid(err.to_string()))?;
    if !value.is_array() {
        return Err(invalid("Seed JSON output was not a list.".into()));
    }
    serde_json::from_value(value).map_err(|err| invalid(err.to_string()))
}
