use thiserror::Error;

/// Validation failures on the project topology. Always user-fixable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("name '{0}' must contain only letters, numbers, hyphens, and underscores")]
    InvalidName(String),

    #[error("instruction is required for LLM agent '{0}'")]
    MissingInstruction(String),

    #[error("orchestrator '{0}' must have at least one sub-agent")]
    NoChildren(String),

    #[error("project has no orchestrator")]
    MissingOrchestrator,

    #[error("'{first}' and '{second}' both map to the identifier '{ident}'")]
    DuplicateIdentifier {
        first: String,
        second: String,
        ident: String,
    },

    #[error("sub-agent '{name}' validation failed")]
    SubAgent {
        name: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("orchestrator validation failed")]
    Orchestrator(#[source] Box<ValidationError>),
}

impl ValidationError {
    /// Innermost failure with the wrapping context stripped.
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            ValidationError::SubAgent { source, .. } => source.root_cause(),
            ValidationError::Orchestrator(source) => source.root_cause(),
            other => other,
        }
    }
}

/// Template asset failures. These indicate a packaging defect, not bad input.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to load template '{name}'")]
    Parse {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("template '{0}' renders a single agent and needs an agent, not a project")]
    AgentScoped(String),

    #[error("failed to render {name}")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },
}

/// Anything that stops a project from being assembled.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("project is invalid")]
    Validation(#[from] ValidationError),

    #[error("template rendering failed")]
    Template(#[from] TemplateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    Input,
    Cloud,
    Filesystem,
    Internal,
}

impl ErrorCategory {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "VALIDATION",
            ErrorCategory::Template => "TEMPLATE",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Cloud => "CLOUD",
            ErrorCategory::Filesystem => "FILESYSTEM",
            ErrorCategory::Internal => "INTERNAL",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            ErrorCategory::Validation => {
                "Fix the reported name/instruction/sub-agent and run agent-builder create again."
            }
            ErrorCategory::Template => {
                "A bundled template is broken. Reinstall agent-builder or open an issue with RUST_LOG=debug output."
            }
            ErrorCategory::Input => "Run agent-builder --help and correct command arguments.",
            ErrorCategory::Cloud => {
                "Check gcloud authentication (gcloud auth login) and the project/region/bucket values."
            }
            ErrorCategory::Filesystem => {
                "Check that the output directory is writable. Files written before the failure are left in place."
            }
            ErrorCategory::Internal => {
                "Retry with RUST_LOG=debug. If it persists, capture logs and open an issue."
            }
        }
    }
}

pub fn categorize_error(err: &anyhow::Error) -> ErrorCategory {
    for cause in err.chain() {
        if cause.downcast_ref::<ValidationError>().is_some() {
            return ErrorCategory::Validation;
        }
        if cause.downcast_ref::<TemplateError>().is_some() {
            return ErrorCategory::Template;
        }
    }

    let msg = format!("{err:#}").to_ascii_lowercase();

    if msg.contains("deploy")
        || msg.contains("gcloud")
        || msg.contains("staging bucket")
        || msg.contains("python3")
    {
        return ErrorCategory::Cloud;
    }

    if msg.contains("invalid value")
        || msg.contains("unknown argument")
        || msg.contains("failed to read input")
        || msg.contains("profile")
        || msg.contains("blueprint")
        || msg.contains("invalid selection")
    {
        return ErrorCategory::Input;
    }

    if msg.contains("failed to write")
        || msg.contains("failed to create")
        || msg.contains("directory")
    {
        return ErrorCategory::Filesystem;
    }

    ErrorCategory::Internal
}

pub fn format_cli_error(err: &anyhow::Error) -> String {
    let category = categorize_error(err);
    format!("[{}] {:#}\nHint: {}", category.code(), err, category.hint())
}
