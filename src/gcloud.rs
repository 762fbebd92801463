use std::io;

use anyhow::Result;

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

pub fn run_command(program: &str, args: &[String]) -> Result<CommandOutput> {
    let output = std::process::Command::new(program)
        .args(args)
        .output()
        .map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                anyhow::anyhow!("'{program}' was not found on PATH")
            } else {
                anyhow::anyhow!("failed to run {program}: {err}")
            }
        })?;

    Ok(CommandOutput {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Reads the local gcloud configuration. Every probe degrades to "not
/// available" / `None` instead of failing.
pub struct Gcloud<F> {
    runner: F,
}

impl Gcloud<fn(&[String]) -> Result<CommandOutput>> {
    pub fn system() -> Self {
        Self::with_runner(run_gcloud)
    }
}

fn run_gcloud(args: &[String]) -> Result<CommandOutput> {
    run_command("gcloud", args)
}

impl<F> Gcloud<F>
where
    F: FnMut(&[String]) -> Result<CommandOutput>,
{
    pub fn with_runner(runner: F) -> Self {
        Self { runner }
    }

    pub fn is_available(&mut self) -> bool {
        match (self.runner)(&["version".to_string()]) {
            Ok(output) => output.success,
            Err(err) => {
                tracing::debug!(error = %err, "gcloud probe failed");
                false
            }
        }
    }

    pub fn project_id(&mut self) -> Option<String> {
        self.config_value("project")
    }

    pub fn region(&mut self) -> Option<String> {
        self.config_value("compute/region")
    }

    fn config_value(&mut self, key: &str) -> Option<String> {
        let args = ["config", "get-value", key].map(str::to_string);
        match (self.runner)(&args) {
            Ok(output) if output.success => parse_config_value(&output.stdout),
            Ok(output) => {
                tracing::warn!(key, exit_code = output.exit_code, "gcloud config lookup failed");
                None
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "gcloud config lookup failed");
                None
            }
        }
    }
}

/// Trimmed value, with empty output and gcloud's `(unset)` marker mapped to `None`.
pub fn parse_config_value(stdout: &str) -> Option<String> {
    let value = stdout.trim();
    if value.is_empty() || value == "(unset)" {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_are_trimmed_and_unset_is_none() {
        assert_eq!(parse_config_value("my-proj\n"), Some("my-proj".to_string()));
        assert_eq!(parse_config_value("  (unset)  \n"), None);
        assert_eq!(parse_config_value(""), None);
    }

    #[test]
    fn probe_issues_expected_gcloud_commands() {
        let mut seen = Vec::new();
        let mut gcloud = Gcloud::with_runner(|args: &[String]| {
            seen.push(args.join(" "));
            Ok(match args.last().map(String::as_str) {
                Some("project") => CommandOutput::ok("demo-project\n"),
                Some("compute/region") => CommandOutput::ok("(unset)\n"),
                _ => CommandOutput::ok("Google Cloud SDK 500.0.0\n"),
            })
        });

        assert!(gcloud.is_available());
        assert_eq!(gcloud.project_id(), Some("demo-project".to_string()));
        assert_eq!(gcloud.region(), None);
        drop(gcloud);
        assert_eq!(
            seen,
            vec![
                "version",
                "config get-value project",
                "config get-value compute/region"
            ]
        );
    }

    #[test]
    fn missing_binary_and_failures_degrade_quietly() {
        let mut missing =
            Gcloud::with_runner(|_: &[String]| Err(anyhow::anyhow!("'gcloud' was not found on PATH")));
        assert!(!missing.is_available());
        assert_eq!(missing.project_id(), None);

        let mut failing = Gcloud::with_runner(|_: &[String]| Ok(CommandOutput::failed(1, "auth")));
        assert!(!failing.is_available());
        assert_eq!(failing.region(), None);
    }
}
