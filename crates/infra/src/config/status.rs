//! Local platform status probe
//!
//! Parses the output of `npx supabase status`, in either the human-readable
//! layout (`API URL: ...`) or the env layout (`API_URL="..."`).

use std::process::{Command, Stdio};

use dancefloor_domain::PlatformSettings;
use tracing::debug;

/// Source of status-command output
pub trait StatusProbe {
    /// Raw stdout of the status command, or `None` when it could not run.
    fn status_output(&self) -> Option<String>;
}

/// Runs `npx supabase status` in the working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NpxStatusProbe;

impl StatusProbe for NpxStatusProbe {
    fn status_output(&self) -> Option<String> {
        let output = Command::new("npx")
            .args(["supabase", "status"])
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                debug!(status = ?output.status.code(), "platform status command finished");
                Some(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Err(err) => {
                debug!(error = %err, "platform status command unavailable");
                None
            }
        }
    }
}

/// Probe that never answers. Used when status probing is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStatusProbe;

impl StatusProbe for NoStatusProbe {
    fn status_output(&self) -> Option<String> {
        None
    }
}

const URL_LABELS: [&str; 2] = ["API URL:", "API_URL="];
const ANON_LABELS: [&str; 4] = ["Publishable key:", "anon key:", "ANON_KEY=", "PUBLISHABLE_KEY="];
const SERVICE_LABELS: [&str; 4] =
    ["Secret key:", "service_role key:", "SERVICE_ROLE_KEY=", "SECRET_KEY="];

/// Extract URL and keys from status output. Unknown lines are ignored and the
/// first value found for each field wins.
pub fn parse_status(output: &str) -> PlatformSettings {
    let mut settings = PlatformSettings::default();

    for line in output.lines().map(str::trim) {
        if settings.url.is_none() {
            settings.url = labelled_value(line, &URL_LABELS);
        }
        if settings.anon_key.is_none() {
            settings.anon_key = labelled_value(line, &ANON_LABELS);
        }
        if settings.service_role_key.is_none() {
            settings.service_role_key = labelled_value(line, &SERVICE_LABELS);
        }
    }

    settings
}

fn labelled_value(line: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| {
        let value = line.strip_prefix(label)?.trim().trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
