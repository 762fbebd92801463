//! Domain model for an orchestration topology: one orchestrator owning an
//! ordered list of sub-agents, wrapped in a project with generation toggles.
//!
//! The topology is a strict two-level tree. Entities are built from already
//! collected primitive values and checked with `validate()` before anything
//! is rendered.

pub mod agent;
pub mod orchestrator;
pub mod project;

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

pub use agent::{Agent, AgentKind};
pub use orchestrator::{OrchestrationPattern, Orchestrator};
pub use project::{BuilderDefaults, Project, ValidatedProject};

/// Model used when the user accepts the default at the model prompt.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Models offered at the model prompt, default first.
pub const AVAILABLE_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-2.5-flash-lite",
];

pub fn is_name_token(name: &str) -> bool {
    static NAME_TOKEN: OnceLock<Regex> = OnceLock::new();
    NAME_TOKEN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("name token pattern is valid"))
        .is_match(name)
}

/// Empty ⇒ `EmptyName`, non-token ⇒ `InvalidName`.
pub fn validate_name_token(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !is_name_token(name) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_token_accepts_letters_digits_hyphen_underscore() {
        for name in ["my-project", "my_project", "project123", "Researcher", "A", "-_-"] {
            assert!(is_name_token(name), "{name} should be accepted");
            assert!(validate_name_token(name).is_ok());
        }
    }

    #[test]
    fn name_token_rejects_spaces_and_symbols() {
        for name in ["my project", "my-project!", "agent.py", "naïve", "a/b"] {
            assert_eq!(
                validate_name_token(name),
                Err(ValidationError::InvalidName(name.to_string()))
            );
        }
        assert_eq!(validate_name_token(""), Err(ValidationError::EmptyName));
    }
}
