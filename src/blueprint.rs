//! Non-interactive input: the same primitive values the interview collects,
//! read from a TOML file.
//!
//! ```toml
//! name = "research-project"
//! pattern = "sequential"
//!
//! [orchestrator]
//! name = "ResearchCoordinator"
//! description = "Coordinates research tasks"
//!
//! [[agents]]
//! name = "Researcher"
//! instruction = "Research the topic"
//! output_key = "research_data"
//! capabilities = ["google_search"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Capability;
use crate::model::{Agent, AgentKind, BuilderDefaults, OrchestrationPattern, Orchestrator, Project};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blueprint {
    pub name: Option<String>,
    pub pattern: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub include_example: Option<bool>,
    pub include_readme: Option<bool>,
    pub include_docker: Option<bool>,
    pub include_deploy_script: Option<bool>,
    pub orchestrator: Option<OrchestratorSpec>,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrchestratorSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSpec {
    pub name: String,
    pub kind: Option<AgentKind>,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub output_key: String,
    pub model: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

pub fn load_blueprint(path: &Path) -> Result<Blueprint> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read blueprint '{}'", path.display()))?;
    parse_blueprint(&content).with_context(|| format!("invalid blueprint '{}'", path.display()))
}

pub fn parse_blueprint(content: &str) -> Result<Blueprint> {
    toml::from_str::<Blueprint>(content).context("blueprint is not valid TOML for this schema")
}

impl AgentSpec {
    fn into_agent(self, default_model: &str) -> Result<Agent> {
        let kind = self.kind.unwrap_or(AgentKind::Llm);
        let capabilities = self
            .capabilities
            .iter()
            .map(|id| {
                Capability::from_id(id.trim()).ok_or_else(|| {
                    anyhow::anyhow!(
                        "blueprint agent '{}' lists unknown tool '{}'. Run agent-builder tools for the list.",
                        self.name,
                        id
                    )
                })
            })
            .collect::<Result<Vec<Capability>>>()?;
        let model = match kind {
            AgentKind::Llm => self.model.unwrap_or_else(|| default_model.to_string()),
            AgentKind::Custom => self.model.unwrap_or_default(),
        };
        Ok(Agent::new(
            self.name,
            kind,
            self.instruction,
            self.output_key,
            model,
            capabilities,
        ))
    }
}

impl Blueprint {
    /// Builds an unvalidated project; blueprint flags override `defaults`.
    pub fn into_project(self, defaults: &BuilderDefaults) -> Result<Project> {
        let name = self
            .name
            .ok_or_else(|| anyhow::anyhow!("blueprint is missing the project 'name'"))?;
        let pattern = match self.pattern.as_deref() {
            None => OrchestrationPattern::Sequential,
            Some(raw) => OrchestrationPattern::from_key(raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "blueprint pattern '{}' is unknown; expected one of {}",
                    raw,
                    OrchestrationPattern::ALL
                        .iter()
                        .map(|pattern| pattern.key())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?,
        };
        let spec = self
            .orchestrator
            .ok_or_else(|| anyhow::anyhow!("blueprint is missing the [orchestrator] table"))?;

        let mut orchestrator = Orchestrator::new(
            spec.name,
            pattern,
            spec.description,
            spec.model.unwrap_or_else(|| defaults.default_model.clone()),
        );
        for agent in self.agents {
            orchestrator.add_sub_agent(agent.into_agent(&defaults.default_model)?);
        }

        let mut project = Project::with_defaults(name, orchestrator, defaults);
        if let Some(dir) = self.output_dir {
            project.output_dir = dir;
        }
        project.include_example = self.include_example.unwrap_or(project.include_example);
        project.include_readme = self.include_readme.unwrap_or(project.include_readme);
        project.include_docker = self.include_docker.unwrap_or(project.include_docker);
        project.include_deploy_script = self
            .include_deploy_script
            .unwrap_or(project.include_deploy_script);
        Ok(project)
    }

    /// Single-agent mode reads exactly one `[[agents]]` entry.
    pub fn into_single_agent(self, default_model: &str) -> Result<Agent> {
        let mut agents = self.agents;
        if agents.len() != 1 {
            return Err(anyhow::anyhow!(
                "blueprint for a single agent must define exactly one [[agents]] entry (found {})",
                agents.len()
            ));
        }
        agents.remove(0).into_agent(default_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESEARCH: &str = r#"
name = "research-project"
pattern = "loop"
include_docker = true

[orchestrator]
name = "ResearchCoordinator"
description = "Coordinates research tasks"

[[agents]]
name = "Researcher"
instruction = "Research the topic"
output_key = "research_data"
capabilities = ["google_search", "vertex_ai_search"]

[[agents]]
name = "data-processor"
kind = "custom"
"#;

    #[test]
    fn blueprint_builds_project_with_defaults_filled_in() {
        let project = parse_blueprint(RESEARCH)
            .expect("blueprint parses")
            .into_project(&BuilderDefaults::default())
            .expect("project builds");

        assert_eq!(project.name, "research-project");
        assert_eq!(project.output_dir, PathBuf::from("./research-project"));
        assert!(project.include_docker);
        assert!(project.include_example);
        let orch = project.orchestrator.as_ref().expect("orchestrator set");
        assert_eq!(orch.pattern, OrchestrationPattern::Loop);
        assert_eq!(orch.model, "gemini-2.5-flash");
        assert_eq!(orch.sub_agents.len(), 2);
        assert_eq!(orch.sub_agents[0].kind, AgentKind::Llm);
        assert_eq!(
            orch.sub_agents[0].capabilities,
            vec![Capability::GoogleSearch, Capability::VertexAiSearch]
        );
        assert_eq!(orch.sub_agents[1].kind, AgentKind::Custom);
        assert!(orch.sub_agents[1].model.is_empty());
        assert!(project.validate().is_ok());
    }

    #[test]
    fn unknown_pattern_and_tool_are_rejected() {
        let bad_pattern = RESEARCH.replace("pattern = \"loop\"", "pattern = \"graph\"");
        let err = parse_blueprint(&bad_pattern)
            .expect("toml parses")
            .into_project(&BuilderDefaults::default())
            .expect_err("graph is not a pattern");
        assert!(err.to_string().contains("blueprint pattern 'graph' is unknown"));

        let bad_tool = RESEARCH.replace("\"vertex_ai_search\"", "\"web_browse\"");
        let err = parse_blueprint(&bad_tool)
            .expect("toml parses")
            .into_project(&BuilderDefaults::default())
            .expect_err("web_browse is not a tool");
        assert!(err.to_string().contains("unknown tool 'web_browse'"));
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let err = parse_blueprint("name = \"x\"\ncolour = \"blue\"\n").expect_err("unknown field");
        assert!(format!("{err:#}").contains("colour"));
    }

    #[test]
    fn single_agent_needs_exactly_one_entry() {
        let blueprint = parse_blueprint(RESEARCH).expect("blueprint parses");
        assert!(blueprint.into_single_agent("gemini-2.5-flash").is_err());

        let single = parse_blueprint(
            "[[agents]]\nname = \"grafana-agent\"\ninstruction = \"Watch dashboards\"\n",
        )
        .expect("blueprint parses")
        .into_single_agent("gemini-2.5-pro")
        .expect("one agent");
        assert_eq!(single.name, "grafana-agent");
        assert_eq!(single.model, "gemini-2.5-pro");
    }
}
