use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Capability;
use crate::error::ValidationError;

use super::is_name_token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Llm,
    Custom,
}

impl AgentKind {
    pub const ALL: [AgentKind; 2] = [AgentKind::Llm, AgentKind::Custom];

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Llm => "llm",
            AgentKind::Custom => "custom",
        }
    }

    pub fn prompt_label(self) -> &'static str {
        match self {
            AgentKind::Llm => "LLM Agent (powered by language model)",
            AgentKind::Custom => "Custom Agent (your own Python class)",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of work in the generated system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub kind: AgentKind,
    pub instruction: String,
    pub output_key: String,
    pub model: String,
    pub capabilities: Vec<Capability>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        kind: AgentKind,
        instruction: impl Into<String>,
        output_key: impl Into<String>,
        model: impl Into<String>,
        capabilities: Vec<Capability>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            instruction: instruction.into(),
            output_key: output_key.into(),
            model: model.into(),
            capabilities,
        }
    }

    pub fn is_llm(&self) -> bool {
        self.kind == AgentKind::Llm
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_name_token(&self.name) {
            return Err(ValidationError::InvalidName(self.name.clone()));
        }
        if self.is_llm() && self.instruction.is_empty() {
            return Err(ValidationError::MissingInstruction(self.name.clone()));
        }
        Ok(())
    }
}
