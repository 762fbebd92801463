use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::assembler::{
    FileRole, GeneratedFile, assemble_combined_project, assemble_project, assemble_single_agent,
};
use crate::blueprint::load_blueprint;
use crate::cli::CreateArgs;
use crate::config::RuntimeConfig;
use crate::generator::{TemplateEngine, fold_identifier};
use crate::model::{Agent, Project};
use crate::prompt::{InterviewOverrides, ProjectType, Prompter};
use crate::theme;
use crate::writer::write_files;

/// What `create` produced, for callers that want more than the terminal report.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub output_dir: PathBuf,
    pub files: Vec<GeneratedFile>,
    pub written: bool,
}

pub fn run_create(cfg: &RuntimeConfig, args: &CreateArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run_create_with(cfg, args, &mut prompter).map(|_| ())
}

pub fn run_create_with<R: BufRead, W: Write>(
    cfg: &RuntimeConfig,
    args: &CreateArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<CreateOutcome> {
    let engine = TemplateEngine::new()?;

    let project_type = if args.single {
        ProjectType::Single
    } else if args.blueprint.is_some() {
        ProjectType::Full
    } else {
        prompter.say(&theme::heading("ADK agent builder"))?;
        prompter.collect_project_type()?
    };

    match project_type {
        ProjectType::Single => create_single_agent(cfg, args, &engine, prompter),
        ProjectType::Full => create_project(cfg, args, &engine, prompter),
    }
}

fn create_project<R: BufRead, W: Write>(
    cfg: &RuntimeConfig,
    args: &CreateArgs,
    engine: &TemplateEngine,
    prompter: &mut Prompter<R, W>,
) -> Result<CreateOutcome> {
    let mut project = match args.blueprint.as_deref() {
        Some(path) => load_blueprint(path)?.into_project(&cfg.defaults)?,
        None => {
            let overrides = InterviewOverrides {
                output_dir: args.output_dir.clone(),
                include_example: args.no_example.then_some(false),
                include_docker: args.docker.then_some(true),
            };
            prompter.collect_project(&cfg.defaults, &overrides)?
        }
    };
    apply_flag_overrides(&mut project, args);

    let files = if args.combined {
        assemble_combined_project(engine, &project)?
    } else {
        assemble_project(engine, &project)?
    };

    if args.dry_run {
        for line in dry_run_lines(&project.output_dir, &files) {
            prompter.say(&line)?;
        }
        return Ok(CreateOutcome {
            output_dir: project.output_dir,
            files,
            written: false,
        });
    }

    write_files(&project.output_dir, &files)?;
    tracing::info!(
        project = %project.name,
        output_dir = %project.output_dir.display(),
        "Generated project"
    );
    for line in project_report(&project, &files) {
        prompter.say(&line)?;
    }

    Ok(CreateOutcome {
        output_dir: project.output_dir,
        files,
        written: true,
    })
}

fn create_single_agent<R: BufRead, W: Write>(
    cfg: &RuntimeConfig,
    args: &CreateArgs,
    engine: &TemplateEngine,
    prompter: &mut Prompter<R, W>,
) -> Result<CreateOutcome> {
    let agent = match args.blueprint.as_deref() {
        Some(path) => load_blueprint(path)?.into_single_agent(&cfg.defaults.default_model)?,
        None => prompter.collect_agent(None, &cfg.defaults.default_model)?,
    };
    let files = assemble_single_agent(engine, &agent)?;
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| cfg.defaults.output_root.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    if args.dry_run {
        for line in dry_run_lines(&output_dir, &files) {
            prompter.say(&line)?;
        }
        return Ok(CreateOutcome {
            output_dir,
            files,
            written: false,
        });
    }

    let written = write_files(&output_dir, &files)?;
    tracing::info!(agent = %agent.name, "Generated single agent");
    prompter.say("")?;
    for path in &written {
        prompter.say(&theme::success(&format!("Created {}", path.display())))?;
    }
    for line in single_agent_hints(&agent) {
        prompter.say(&line)?;
    }

    Ok(CreateOutcome {
        output_dir,
        files,
        written: true,
    })
}

/// Command-line flags win over interview answers, blueprint values and profile defaults.
pub fn apply_flag_overrides(project: &mut Project, args: &CreateArgs) {
    if let Some(dir) = args.output_dir.clone() {
        project.output_dir = dir;
    }
    if args.no_example {
        project.include_example = false;
    }
    if args.no_readme {
        project.include_readme = false;
    }
    if args.docker {
        project.include_docker = true;
    }
    if args.no_deploy_script {
        project.include_deploy_script = false;
    }
}

pub fn dry_run_lines(output_dir: &std::path::Path, files: &[GeneratedFile]) -> Vec<String> {
    let mut lines = vec![format!(
        "Dry run: {} file(s) would be written to {}",
        files.len(),
        output_dir.display()
    )];
    lines.extend(
        files
            .iter()
            .map(|file| format!("  {} ({} bytes)", file.path.display(), file.content.len())),
    );
    lines
}

/// Post-generation summary: architecture tree, created files, next steps.
pub fn project_report(project: &Project, files: &[GeneratedFile]) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        theme::success(&format!(
            "Created project '{}' in {}",
            project.name,
            project.output_dir.display()
        )),
        String::new(),
        theme::heading("System architecture"),
    ];

    if let Some(orchestrator) = project.orchestrator.as_ref() {
        lines.push(format!(
            "  {} ({})",
            theme::bold(&orchestrator.name),
            orchestrator.pattern.label()
        ));
        let last = orchestrator.sub_agents.len().saturating_sub(1);
        for (idx, agent) in orchestrator.sub_agents.iter().enumerate() {
            let branch = if idx == last { "└──" } else { "├──" };
            lines.push(format!("  {branch} {} [{}]", agent.name, agent.kind.label()));
        }
    }

    lines.push(String::new());
    lines.push(theme::heading("Files"));
    let width = files
        .iter()
        .map(|file| file.path.display().to_string().len())
        .max()
        .unwrap_or(0);
    for file in files {
        lines.push(format!(
            "  {:<width$}  {}",
            file.path.display().to_string(),
            theme::dim(file.role.label())
        ));
    }

    lines.push(String::new());
    lines.push(theme::heading("Next steps"));
    lines.push(format!("  cd {}", project.output_dir.display()));
    lines.push("  pip install -r requirements.txt".to_string());
    if files.iter().any(|file| file.role == FileRole::Entrypoint) {
        lines.push("  python main.py \"Your prompt here\"".to_string());
    }
    lines.push(format!("  adk web {}", theme::dim("# interactive UI")));
    if files.iter().any(|file| file.role == FileRole::DeployScript) {
        lines.push(format!(
            "  agent-builder deploy {}",
            theme::dim("# Vertex AI Agent Engine")
        ));
    }
    lines
}

/// How to wire a standalone agent into an existing orchestrator.
pub fn single_agent_hints(agent: &Agent) -> Vec<String> {
    let ident = fold_identifier(&agent.name);
    vec![
        String::new(),
        theme::heading("Add it to an orchestrator"),
        format!("  from {ident}.agent import agent as {ident}"),
        format!("  sub_agents=[..., {ident}]"),
    ]
}
