//! Project assembly: a validated [`Project`] in, an ordered list of
//! `(relative path, content)` files out. Nothing here touches the filesystem.

use std::path::PathBuf;

use crate::error::GenerateError;
use crate::generator::{ProjectView, TemplateEngine, TemplateKind, fold_identifier};
use crate::model::{Agent, Project};

/// What a generated file is for; drives the post-generation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Orchestrator,
    PackageInit,
    SubAgent,
    Entrypoint,
    Requirements,
    Readme,
    Dockerfile,
    DeployScript,
}

impl FileRole {
    pub fn label(self) -> &'static str {
        match self {
            FileRole::Orchestrator => "Orchestrator",
            FileRole::PackageInit => "Package marker",
            FileRole::SubAgent => "Sub-agent",
            FileRole::Entrypoint => "Example usage",
            FileRole::Requirements => "Dependencies",
            FileRole::Readme => "Documentation",
            FileRole::Dockerfile => "Container image",
            FileRole::DeployScript => "Agent Engine deployment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative to the project output directory.
    pub path: PathBuf,
    pub content: String,
    pub role: FileRole,
}

impl GeneratedFile {
    fn new(path: impl Into<PathBuf>, content: String, role: FileRole) -> Self {
        Self {
            path: path.into(),
            content,
            role,
        }
    }
}

/// Multi-file layout: one package per orchestrator and per child, then the
/// project-level artifacts selected by the feature flags.
pub fn assemble_project(
    engine: &TemplateEngine,
    project: &Project,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let validated = project.validated()?;
    let view = ProjectView::new(validated.project, validated.orchestrator);
    let orchestrator_dir = PathBuf::from(&view.orchestrator.ident);

    let mut files = vec![
        GeneratedFile::new(
            orchestrator_dir.join("agent.py"),
            engine.render_project(TemplateKind::OrchestratorAgent, &view)?,
            FileRole::Orchestrator,
        ),
        GeneratedFile::new(
            orchestrator_dir.join("__init__.py"),
            engine.render_project(TemplateKind::PackageInit, &view)?,
            FileRole::PackageInit,
        ),
    ];

    for agent in &validated.orchestrator.sub_agents {
        let agent_dir = PathBuf::from(fold_identifier(&agent.name));
        files.push(GeneratedFile::new(
            agent_dir.join("agent.py"),
            engine.render_sub_agent(agent)?,
            FileRole::SubAgent,
        ));
        files.push(GeneratedFile::new(
            agent_dir.join("__init__.py"),
            engine.render_project(TemplateKind::PackageInit, &view)?,
            FileRole::PackageInit,
        ));
    }

    push_project_artifacts(engine, &view, &mut files)?;
    tracing::info!(project = %project.name, files = files.len(), "Assembled project");
    Ok(files)
}

/// Every agent in the orchestrator package's `agent.py`; no child packages.
pub fn assemble_combined_project(
    engine: &TemplateEngine,
    project: &Project,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let validated = project.validated()?;
    let view = ProjectView::combined(validated.project, validated.orchestrator);
    let orchestrator_dir = PathBuf::from(&view.orchestrator.ident);

    let mut files = vec![
        GeneratedFile::new(
            orchestrator_dir.join("agent.py"),
            engine.render_project(TemplateKind::CombinedAgents, &view)?,
            FileRole::Orchestrator,
        ),
        GeneratedFile::new(
            orchestrator_dir.join("__init__.py"),
            engine.render_project(TemplateKind::PackageInit, &view)?,
            FileRole::PackageInit,
        ),
    ];

    push_project_artifacts(engine, &view, &mut files)?;
    tracing::info!(project = %project.name, files = files.len(), "Assembled combined project");
    Ok(files)
}

/// Single-agent layout: exactly one `<folded>/agent.py`.
pub fn assemble_single_agent(
    engine: &TemplateEngine,
    agent: &Agent,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    agent.validate()?;
    let path = PathBuf::from(fold_identifier(&agent.name)).join("agent.py");
    let content = engine.render_sub_agent(agent)?;
    tracing::info!(agent = %agent.name, "Assembled single agent");
    Ok(vec![GeneratedFile::new(path, content, FileRole::SubAgent)])
}

fn push_project_artifacts(
    engine: &TemplateEngine,
    view: &ProjectView,
    files: &mut Vec<GeneratedFile>,
) -> Result<(), GenerateError> {
    let artifacts = [
        (view.include_example, "main.py", TemplateKind::Entrypoint, FileRole::Entrypoint),
        (true, "requirements.txt", TemplateKind::Requirements, FileRole::Requirements),
        (view.include_readme, "README.md", TemplateKind::Readme, FileRole::Readme),
        (view.include_docker, "Dockerfile", TemplateKind::Dockerfile, FileRole::Dockerfile),
        (
            view.include_deploy_script,
            "deploy.py",
            TemplateKind::DeployScript,
            FileRole::DeployScript,
        ),
    ];

    for (enabled, path, kind, role) in artifacts {
        if !enabled {
            continue;
        }
        let content = engine.render_project(kind, view)?;
        tracing::debug!(path, bytes = content.len(), "Rendered artifact");
        files.push(GeneratedFile::new(path, content, role));
    }
    Ok(())
}
