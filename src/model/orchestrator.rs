use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::generator::fold_identifier;

use super::agent::Agent;
use super::validate_name_token;

/// How an orchestrator runs its sub-agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrchestrationPattern {
    Sequential,
    Parallel,
    LlmCoordinated,
    Loop,
}

const PATTERN_TABLE: [(OrchestrationPattern, &str, &str); 4] = [
    (
        OrchestrationPattern::Sequential,
        "Sequential",
        "Sub-agents run one after another",
    ),
    (
        OrchestrationPattern::Parallel,
        "Parallel",
        "Sub-agents run simultaneously",
    ),
    (
        OrchestrationPattern::LlmCoordinated,
        "LLM-Coordinated",
        "Orchestrator decides which sub-agent to call",
    ),
    (
        OrchestrationPattern::Loop,
        "Loop",
        "Repeat sub-agents until condition met",
    ),
];

impl OrchestrationPattern {
    pub const ALL: [OrchestrationPattern; 4] = [
        OrchestrationPattern::Sequential,
        OrchestrationPattern::Parallel,
        OrchestrationPattern::LlmCoordinated,
        OrchestrationPattern::Loop,
    ];

    fn row(self) -> (OrchestrationPattern, &'static str, &'static str) {
        match self {
            OrchestrationPattern::Sequential => PATTERN_TABLE[0],
            OrchestrationPattern::Parallel => PATTERN_TABLE[1],
            OrchestrationPattern::LlmCoordinated => PATTERN_TABLE[2],
            OrchestrationPattern::Loop => PATTERN_TABLE[3],
        }
    }

    pub fn label(self) -> &'static str {
        self.row().1
    }

    pub fn description(self) -> &'static str {
        self.row().2
    }

    /// Stable machine key, as used in blueprints and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            OrchestrationPattern::Sequential => "sequential",
            OrchestrationPattern::Parallel => "parallel",
            OrchestrationPattern::LlmCoordinated => "llm-coordinated",
            OrchestrationPattern::Loop => "loop",
        }
    }

    pub fn from_key(key: &str) -> Option<OrchestrationPattern> {
        let normalized = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|pattern| {
            pattern.key() == normalized || pattern.label().eq_ignore_ascii_case(&normalized)
        })
    }
}

impl fmt::Display for OrchestrationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Root of the topology. Owns its sub-agents exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orchestrator {
    pub name: String,
    pub pattern: OrchestrationPattern,
    pub description: String,
    pub model: String,
    pub sub_agents: Vec<Agent>,
}

impl Orchestrator {
    pub fn new(
        name: impl Into<String>,
        pattern: OrchestrationPattern,
        description: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern,
            description: description.into(),
            model: model.into(),
            sub_agents: Vec::new(),
        }
    }

    /// Appends without validating; checks happen in `validate`.
    pub fn add_sub_agent(&mut self, agent: Agent) {
        self.sub_agents.push(agent);
    }

    /// Fails fast: the first invalid sub-agent is reported, the rest are not visited.
    /// Every agent, the orchestrator included, must fold to its own identifier
    /// since the identifier names its package and its Python binding.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sub_agents.is_empty() {
            return Err(ValidationError::NoChildren(self.name.clone()));
        }
        validate_name_token(&self.name)?;
        for agent in &self.sub_agents {
            agent.validate().map_err(|source| ValidationError::SubAgent {
                name: agent.name.clone(),
                source: Box::new(source),
            })?;
        }

        let mut taken = vec![(fold_identifier(&self.name), self.name.as_str())];
        for agent in &self.sub_agents {
            let ident = fold_identifier(&agent.name);
            if let Some((_, first)) = taken.iter().find(|(known, _)| *known == ident) {
                return Err(ValidationError::DuplicateIdentifier {
                    first: (*first).to_string(),
                    second: agent.name.clone(),
                    ident,
                });
            }
            taken.push((ident, agent.name.as_str()));
        }
        Ok(())
    }
}
