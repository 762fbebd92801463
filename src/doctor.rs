use anyhow::Result;

use crate::config::RuntimeConfig;
use crate::gcloud::{CommandOutput, Gcloud, run_command};
use crate::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub name: &'static str,
    pub found: bool,
    pub detail: String,
    pub needed_for: &'static str,
}

/// Probes the external tools generated projects rely on. `runner` gets the
/// program name and its arguments.
pub fn check_tools<F>(mut runner: F) -> Vec<ToolCheck>
where
    F: FnMut(&str, &[String]) -> Result<CommandOutput>,
{
    let probes: [(&'static str, &[&str], &'static str); 2] = [
        ("python3", &["--version"], "running generated projects and deploy.py"),
        ("adk", &["--version"], "adk web / adk run"),
    ];

    let mut checks = probes
        .iter()
        .map(|&(program, args, needed_for)| {
            let args = args.iter().map(|arg| arg.to_string()).collect::<Vec<_>>();
            tool_check(program, needed_for, runner(program, &args))
        })
        .collect::<Vec<_>>();

    let mut gcloud = Gcloud::with_runner(|args: &[String]| runner("gcloud", args));
    let found = gcloud.is_available();
    let project = if found { gcloud.project_id() } else { None };
    checks.push(ToolCheck {
        name: "gcloud",
        found,
        detail: match (found, project) {
            (true, Some(project)) => format!("project={project}"),
            (true, None) => "no default project configured".to_string(),
            (false, _) => "not available".to_string(),
        },
        needed_for: "agent-builder deploy",
    });
    checks
}

fn tool_check(
    name: &'static str,
    needed_for: &'static str,
    result: Result<CommandOutput>,
) -> ToolCheck {
    match result {
        Ok(output) if output.success => {
            let version = if output.stdout.trim().is_empty() {
                output.stderr.trim()
            } else {
                output.stdout.trim()
            };
            ToolCheck {
                name,
                found: true,
                detail: version.lines().next().unwrap_or_default().to_string(),
                needed_for,
            }
        }
        Ok(output) => ToolCheck {
            name,
            found: false,
            detail: format!("exited with status {}", output.exit_code),
            needed_for,
        },
        Err(err) => ToolCheck {
            name,
            found: false,
            detail: err.to_string(),
            needed_for,
        },
    }
}

pub fn run_doctor(cfg: &RuntimeConfig) -> Result<()> {
    println!(
        "Active profile: '{}' (config: {})",
        cfg.profile, cfg.config_path
    );

    println!("Tool check:");
    for check in check_tools(|program, args| run_command(program, args)) {
        let line = format!(
            "{} ({}) needed for {}",
            check.name, check.detail, check.needed_for
        );
        if check.found {
            println!("{}", theme::success(&line));
        } else {
            println!("{}", theme::failure(&line));
        }
    }

    println!(
        "Defaults: model={} example={} readme={} docker={} deploy_script={}",
        cfg.defaults.default_model,
        cfg.defaults.include_example,
        cfg.defaults.include_readme,
        cfg.defaults.include_docker,
        cfg.defaults.include_deploy_script
    );
    println!(
        "Output root: {}",
        cfg.defaults
            .output_root
            .as_ref()
            .map(|root| root.display().to_string())
            .unwrap_or_else(|| "<current directory>".to_string())
    );
    println!("Use gcloud for deploy defaults: {}", cfg.use_gcloud);
    Ok(())
}
