use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::DeployArgs;
use crate::config::RuntimeConfig;
use crate::gcloud::{CommandOutput, Gcloud};
use crate::prompt::Prompter;
use crate::theme;

pub const DEPLOY_SCRIPT: &str = "deploy.py";
pub const DEFAULT_REGION: &str = "us-central1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub project_id: String,
    pub region: String,
    pub staging_bucket: String,
}

/// Arguments for `python3`, script path first.
pub fn build_deploy_command(script: &Path, target: &DeployTarget) -> Vec<String> {
    vec![
        script.display().to_string(),
        "--project-id".to_string(),
        target.project_id.clone(),
        "--region".to_string(),
        target.region.clone(),
        "--staging-bucket".to_string(),
        target.staging_bucket.clone(),
    ]
}

/// Flag, then profile, then the value gcloud offers (if the user accepts it),
/// then a prompt.
pub fn resolve_deploy_target<R, W, F>(
    args: &DeployArgs,
    cfg: &RuntimeConfig,
    gcloud: Option<&mut Gcloud<F>>,
    prompter: &mut Prompter<R, W>,
) -> Result<DeployTarget>
where
    R: BufRead,
    W: Write,
    F: FnMut(&[String]) -> Result<CommandOutput>,
{
    let mut project_id = first_value(&args.project_id, &cfg.gcp_project_id);
    let mut region = first_value(&args.region, &cfg.gcp_region);

    if let Some(gcloud) = gcloud {
        if (project_id.is_none() || region.is_none()) && gcloud.is_available() {
            if project_id.is_none() {
                project_id = offer_gcloud_value(prompter, "project ID", gcloud.project_id())?;
            }
            if region.is_none() {
                region = offer_gcloud_value(prompter, "region", gcloud.region())?;
            }
        }
    }

    let project_id = match project_id {
        Some(value) => value,
        None => prompter.ask_valid("GCP project ID", None, |value| {
            if value.is_empty() {
                Err("Project ID is required.".to_string())
            } else {
                Ok(())
            }
        })?,
    };
    let region = match region {
        Some(value) => value,
        None => prompter.ask("GCP region", Some(DEFAULT_REGION))?,
    };
    let staging_bucket = match first_value(&args.staging_bucket, &cfg.staging_bucket) {
        Some(value) => value,
        None => prompter.ask_valid("GCS staging bucket (gs://...)", None, check_bucket)?,
    };

    Ok(DeployTarget {
        project_id,
        region,
        staging_bucket,
    })
}

fn first_value(flag: &Option<String>, profile: &Option<String>) -> Option<String> {
    flag.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| profile.clone())
}

fn offer_gcloud_value<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    what: &str,
    offered: Option<String>,
) -> Result<Option<String>> {
    let Some(value) = offered else {
        return Ok(None);
    };
    if prompter.confirm(&format!("Use gcloud {what} '{value}'?"), true)? {
        Ok(Some(value))
    } else {
        Ok(None)
    }
}

fn check_bucket(value: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        Err("Staging bucket is required.".to_string())
    } else if !value.starts_with("gs://") {
        Err("Staging bucket must start with gs://".to_string())
    } else {
        Ok(())
    }
}

pub fn run_deploy(cfg: &RuntimeConfig, args: &DeployArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut gcloud = Gcloud::system();
    let gcloud = cfg.use_gcloud.then_some(&mut gcloud);
    run_deploy_in(Path::new("."), cfg, args, gcloud, &mut prompter, run_python_inherited)?;
    Ok(())
}

/// `runner` receives the `python3` arguments and reports the exit status.
pub fn run_deploy_in<R, W, F, P>(
    dir: &Path,
    cfg: &RuntimeConfig,
    args: &DeployArgs,
    gcloud: Option<&mut Gcloud<F>>,
    prompter: &mut Prompter<R, W>,
    mut runner: P,
) -> Result<DeployTarget>
where
    R: BufRead,
    W: Write,
    F: FnMut(&[String]) -> Result<CommandOutput>,
    P: FnMut(&[String]) -> Result<CommandOutput>,
{
    let script = dir.join(DEPLOY_SCRIPT);
    if !script.is_file() {
        return Err(anyhow::anyhow!(
            "deploy.py not found in current directory. Run agent-builder deploy from the generated project root."
        ));
    }

    let target = resolve_deploy_target(args, cfg, gcloud, prompter)?;
    prompter.say(&theme::heading("Deploying to Vertex AI Agent Engine"))?;
    prompter.say(&format!("   Project: {}", target.project_id))?;
    prompter.say(&format!("   Region: {}", target.region))?;
    prompter.say(&format!("   Staging bucket: {}", target.staging_bucket))?;

    let command = build_deploy_command(&script, &target);
    tracing::info!(command = %format!("python3 {}", command.join(" ")), "Running deploy script");
    let output = runner(&command).context("deployment failed: could not start python3")?;
    if !output.success {
        return Err(anyhow::anyhow!(
            "deployment failed: deploy.py exited with status {}",
            output.exit_code
        ));
    }

    prompter.say(&theme::success("Deployment finished"))?;
    Ok(target)
}

/// Runs `python3` with the terminal attached so the script's progress is visible.
fn run_python_inherited(args: &[String]) -> Result<CommandOutput> {
    let status = std::process::Command::new("python3")
        .args(args)
        .status()
        .map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                anyhow::anyhow!("'python3' was not found on PATH")
            } else {
                anyhow::anyhow!("failed to run python3: {err}")
            }
        })?;
    Ok(CommandOutput {
        success: status.success(),
        exit_code: status.code().unwrap_or(-1),
        stdout: String::new(),
        stderr: String::new(),
    })
}
