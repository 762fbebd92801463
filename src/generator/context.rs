//! Serializable snapshots handed to the templates.
//!
//! All identifier folding and import aggregation happens here so templates only
//! substitute values. String fields ending in `_py` are already escaped for a
//! double-quoted Python literal.

use serde::Serialize;

use crate::catalog::Capability;
use crate::model::{Agent, AgentKind, OrchestrationPattern, Orchestrator, Project};

use super::helpers::{
    agent_class_imports, capability_imports, capability_listing, class_name,
    combined_capability_imports, composition_class, fold_identifier, py_string,
};

#[derive(Debug, Clone, Serialize)]
pub struct AgentView {
    pub name: String,
    pub ident: String,
    pub class_name: String,
    pub kind: &'static str,
    pub is_llm: bool,
    pub instruction: String,
    pub instruction_py: String,
    pub output_key: String,
    pub output_key_py: String,
    pub model_py: String,
    pub has_capabilities: bool,
    pub capability_imports: String,
    pub capability_list: String,
}

impl AgentView {
    pub fn from_agent(agent: &Agent) -> Self {
        let is_llm = agent.kind == AgentKind::Llm;
        let capabilities: &[Capability] = if is_llm {
            agent.capabilities.as_slice()
        } else {
            &[]
        };
        Self {
            name: agent.name.clone(),
            ident: fold_identifier(&agent.name),
            class_name: class_name(&agent.name),
            kind: agent.kind.label(),
            is_llm,
            instruction: agent.instruction.clone(),
            instruction_py: py_string(&agent.instruction),
            output_key: agent.output_key.clone(),
            output_key_py: py_string(&agent.output_key),
            model_py: py_string(&agent.model),
            has_capabilities: !capabilities.is_empty(),
            capability_imports: capability_imports(capabilities).join(", "),
            capability_list: capability_listing(capabilities).join(", "),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrchestratorView {
    pub name: String,
    pub ident: String,
    pub pattern_key: &'static str,
    pub pattern_label: &'static str,
    pub pattern_description: &'static str,
    pub composition_class: &'static str,
    pub is_llm_coordinated: bool,
    pub description: String,
    pub description_py: String,
    pub coordinator_instruction_py: String,
    pub model_py: String,
    pub sub_agent_refs: String,
    pub sub_agents: Vec<AgentView>,
}

impl OrchestratorView {
    pub fn from_orchestrator(orchestrator: &Orchestrator) -> Self {
        let sub_agents = orchestrator
            .sub_agents
            .iter()
            .map(AgentView::from_agent)
            .collect::<Vec<AgentView>>();
        let sub_agent_refs = sub_agents
            .iter()
            .map(|agent| agent.ident.as_str())
            .collect::<Vec<&str>>()
            .join(", ");
        Self {
            name: orchestrator.name.clone(),
            ident: fold_identifier(&orchestrator.name),
            pattern_key: orchestrator.pattern.key(),
            pattern_label: orchestrator.pattern.label(),
            pattern_description: orchestrator.pattern.description(),
            composition_class: composition_class(orchestrator.pattern),
            is_llm_coordinated: orchestrator.pattern == OrchestrationPattern::LlmCoordinated,
            description: orchestrator.description.clone(),
            description_py: py_string(&orchestrator.description),
            coordinator_instruction_py: py_string(&coordinator_instruction(orchestrator)),
            model_py: py_string(&orchestrator.model),
            sub_agent_refs,
            sub_agents,
        }
    }
}

fn coordinator_instruction(orchestrator: &Orchestrator) -> String {
    let roster = orchestrator
        .sub_agents
        .iter()
        .map(|agent| fold_identifier(&agent.name))
        .collect::<Vec<String>>()
        .join(", ");
    if orchestrator.description.trim().is_empty() {
        format!("Route each request to the most suitable sub-agent: {roster}.")
    } else {
        format!(
            "{} Route each request to the most suitable sub-agent: {roster}.",
            orchestrator.description.trim()
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub name: String,
    pub ident: String,
    pub include_example: bool,
    pub include_readme: bool,
    pub include_docker: bool,
    pub include_deploy_script: bool,
    /// Every agent lives in the orchestrator's `agent.py`.
    pub combined: bool,
    pub agent_imports: String,
    pub has_custom_agents: bool,
    pub has_capabilities: bool,
    pub capability_imports: String,
    pub packages: Vec<String>,
    pub orchestrator: OrchestratorView,
}

impl ProjectView {
    pub fn new(project: &Project, orchestrator: &Orchestrator) -> Self {
        let orchestrator_view = OrchestratorView::from_orchestrator(orchestrator);
        let capability_imports = combined_capability_imports(&orchestrator.sub_agents);
        let mut packages = vec![orchestrator_view.ident.clone()];
        for agent in &orchestrator_view.sub_agents {
            if !packages.contains(&agent.ident) {
                packages.push(agent.ident.clone());
            }
        }
        Self {
            name: project.name.clone(),
            ident: fold_identifier(&project.name),
            include_example: project.include_example,
            include_readme: project.include_readme,
            include_docker: project.include_docker,
            include_deploy_script: project.include_deploy_script,
            combined: false,
            agent_imports: agent_class_imports(orchestrator.pattern, &orchestrator.sub_agents)
                .join(", "),
            has_custom_agents: orchestrator
                .sub_agents
                .iter()
                .any(|agent| agent.kind == AgentKind::Custom),
            has_capabilities: !capability_imports.is_empty(),
            capability_imports: capability_imports.join(", "),
            packages,
            orchestrator: orchestrator_view,
        }
    }

    /// View for the combined layout: the orchestrator package is the only one written.
    pub fn combined(project: &Project, orchestrator: &Orchestrator) -> Self {
        let mut view = Self::new(project, orchestrator);
        view.combined = true;
        view.packages.truncate(1);
        view
    }
}
