use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::orchestrator::Orchestrator;
use super::{DEFAULT_MODEL, validate_name_token};

/// Read-only generation defaults resolved once at startup from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderDefaults {
    pub default_model: String,
    pub output_root: Option<PathBuf>,
    pub include_example: bool,
    pub include_readme: bool,
    pub include_docker: bool,
    pub include_deploy_script: bool,
}

impl Default for BuilderDefaults {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            output_root: None,
            include_example: true,
            include_readme: true,
            include_docker: false,
            include_deploy_script: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub orchestrator: Option<Orchestrator>,
    pub output_dir: PathBuf,
    pub include_example: bool,
    pub include_readme: bool,
    pub include_docker: bool,
    pub include_deploy_script: bool,
}

impl Project {
    pub fn new(name: impl Into<String>, orchestrator: Orchestrator) -> Self {
        Self::with_defaults(name, orchestrator, &BuilderDefaults::default())
    }

    pub fn with_defaults(
        name: impl Into<String>,
        orchestrator: Orchestrator,
        defaults: &BuilderDefaults,
    ) -> Self {
        let name = name.into();
        Self {
            output_dir: default_output_dir(&name, defaults),
            name,
            orchestrator: Some(orchestrator),
            include_example: defaults.include_example,
            include_readme: defaults.include_readme,
            include_docker: defaults.include_docker,
            include_deploy_script: defaults.include_deploy_script,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name_token(&self.name)?;
        let orchestrator = self
            .orchestrator
            .as_ref()
            .ok_or(ValidationError::MissingOrchestrator)?;
        orchestrator
            .validate()
            .map_err(|source| ValidationError::Orchestrator(Box::new(source)))
    }

    /// Validates and hands back a view with the orchestrator unwrapped.
    pub fn validated(&self) -> Result<ValidatedProject<'_>, ValidationError> {
        self.validate()?;
        let orchestrator = self
            .orchestrator
            .as_ref()
            .ok_or(ValidationError::MissingOrchestrator)?;
        Ok(ValidatedProject {
            project: self,
            orchestrator,
        })
    }
}

/// A project that has passed `validate()`; the only shape renderers accept.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedProject<'a> {
    pub project: &'a Project,
    pub orchestrator: &'a Orchestrator,
}

/// `./<name>`, or `<output_root>/<name>` when a profile sets an output root.
pub fn default_output_dir(name: &str, defaults: &BuilderDefaults) -> PathBuf {
    match defaults.output_root.as_ref() {
        Some(root) => root.join(name),
        None => PathBuf::from(format!("./{name}")),
    }
}
