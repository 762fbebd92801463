use serde::Serialize;
use tera::{Context, Tera};

use crate::error::TemplateError;
use crate::model::{Agent, Orchestrator};

use super::context::{AgentView, OrchestratorView, ProjectView};

/// Bundled template assets, keyed by the name they are registered under.
/// The macros file must stay first: later templates import it.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("macros.py", include_str!("../../templates/macros.py.tera")),
    (
        "orchestrator_agent.py",
        include_str!("../../templates/orchestrator_agent.py.tera"),
    ),
    ("agent_single.py", include_str!("../../templates/agent_single.py.tera")),
    ("agent.py", include_str!("../../templates/agent.py.tera")),
    ("package_init.py", include_str!("../../templates/package_init.py.tera")),
    ("main.py", include_str!("../../templates/main.py.tera")),
    ("requirements.txt", include_str!("../../templates/requirements.txt.tera")),
    ("README.md", include_str!("../../templates/README.md.tera")),
    ("Dockerfile.txt", include_str!("../../templates/Dockerfile.tera")),
    ("deploy.py", include_str!("../../templates/deploy.py.tera")),
];

/// Artifact kinds the engine knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    OrchestratorAgent,
    SubAgent,
    CombinedAgents,
    PackageInit,
    Entrypoint,
    Requirements,
    Readme,
    Dockerfile,
    DeployScript,
}

impl TemplateKind {
    pub fn template_name(self) -> &'static str {
        match self {
            TemplateKind::OrchestratorAgent => "orchestrator_agent.py",
            TemplateKind::SubAgent => "agent_single.py",
            TemplateKind::CombinedAgents => "agent.py",
            TemplateKind::PackageInit => "package_init.py",
            TemplateKind::Entrypoint => "main.py",
            TemplateKind::Requirements => "requirements.txt",
            TemplateKind::Readme => "README.md",
            TemplateKind::Dockerfile => "Dockerfile.txt",
            TemplateKind::DeployScript => "deploy.py",
        }
    }
}

#[derive(Serialize)]
struct OrchestratorScope<'a> {
    orchestrator: &'a OrchestratorView,
}

#[derive(Serialize)]
struct AgentScope<'a> {
    agent: &'a AgentView,
}

/// Parsed template set. Build once per process and reuse for every file.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        Self::from_sources(TEMPLATES)
    }

    /// Registers each `(name, source)` pair in order, reporting the first one
    /// that fails to parse.
    pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        for (name, source) in sources {
            tera.add_raw_template(name, source)
                .map_err(|source| TemplateError::Parse {
                    name: (*name).to_string(),
                    source,
                })?;
        }
        tracing::debug!(templates = sources.len(), "Loaded template set");
        Ok(Self { tera })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|known| known == name)
    }

    /// Pure render of `name` against a serializable snapshot.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, TemplateError> {
        if !self.has_template(name) {
            return Err(TemplateError::UnknownTemplate(name.to_string()));
        }
        let context = Context::from_serialize(data).map_err(|source| TemplateError::Render {
            name: name.to_string(),
            source,
        })?;
        self.tera
            .render(name, &context)
            .map_err(|source| TemplateError::Render {
                name: name.to_string(),
                source,
            })
    }

    pub fn render_orchestrator(&self, orchestrator: &Orchestrator) -> Result<String, TemplateError> {
        let view = OrchestratorView::from_orchestrator(orchestrator);
        self.render(
            TemplateKind::OrchestratorAgent.template_name(),
            &OrchestratorScope {
                orchestrator: &view,
            },
        )
    }

    pub fn render_sub_agent(&self, agent: &Agent) -> Result<String, TemplateError> {
        let view = AgentView::from_agent(agent);
        self.render(
            TemplateKind::SubAgent.template_name(),
            &AgentScope { agent: &view },
        )
    }

    /// Renders a project-scoped artifact. The orchestrator file is rendered from
    /// the view's orchestrator; sub-agent files go through `render_sub_agent`.
    pub fn render_project(
        &self,
        kind: TemplateKind,
        view: &ProjectView,
    ) -> Result<String, TemplateError> {
        match kind {
            TemplateKind::OrchestratorAgent => self.render(
                kind.template_name(),
                &OrchestratorScope {
                    orchestrator: &view.orchestrator,
                },
            ),
            TemplateKind::SubAgent => Err(TemplateError::AgentScoped(
                kind.template_name().to_string(),
            )),
            _ => self.render(kind.template_name(), view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Capability;
    use crate::model::{AgentKind, OrchestrationPattern, Project};

    fn engine() -> TemplateEngine {
        TemplateEngine::new().expect("bundled templates parse")
    }

    fn research_project(pattern: OrchestrationPattern) -> Project {
        let mut orch = Orchestrator::new(
            "ResearchCoordinator",
            pattern,
            "Coordinates research tasks",
            "gemini-2.0-flash",
        );
        orch.add_sub_agent(Agent::new(
            "Researcher",
            AgentKind::Llm,
            "Research the topic",
            "research_data",
            "gemini-2.0-flash",
            Vec::new(),
        ));
        orch.add_sub_agent(Agent::new(
            "Writer",
            AgentKind::Llm,
            "Write based on {research_data}",
            "draft",
            "gemini-2.0-flash",
            Vec::new(),
        ));
        Project::new("test-project", orch)
    }

    fn render_kind(project: &Project, kind: TemplateKind) -> String {
        let validated = project.validated().expect("project is valid");
        let view = ProjectView::new(validated.project, validated.orchestrator);
        engine()
            .render_project(kind, &view)
            .expect("render succeeds")
    }

    #[test]
    fn every_kind_has_a_registered_template() {
        let engine = engine();
        for kind in [
            TemplateKind::OrchestratorAgent,
            TemplateKind::SubAgent,
            TemplateKind::CombinedAgents,
            TemplateKind::PackageInit,
            TemplateKind::Entrypoint,
            TemplateKind::Requirements,
            TemplateKind::Readme,
            TemplateKind::Dockerfile,
            TemplateKind::DeployScript,
        ] {
            assert!(engine.has_template(kind.template_name()), "{kind:?}");
        }
    }

    #[test]
    fn sequential_orchestrator_file_references_children_in_order() {
        let project = research_project(OrchestrationPattern::Sequential);
        let orch = project.orchestrator.as_ref().expect("orchestrator set");
        let out = engine().render_orchestrator(orch).expect("render succeeds");

        assert!(out.contains("from google.adk.agents import SequentialAgent"));
        assert!(out.contains("from researcher.agent import agent as researcher"));
        assert!(out.contains("from writer.agent import agent as writer"));
        assert!(out.contains("research_coordinator = SequentialAgent("));
        assert!(out.contains("name=\"research_coordinator\""));
        assert!(out.contains("sub_agents=[researcher, writer]"));
        assert!(out.contains("root_agent = research_coordinator"));
        assert!(out.contains("agent = research_coordinator"));
        let researcher = out.find("import agent as researcher").expect("researcher import");
        let writer = out.find("import agent as writer").expect("writer import");
        assert!(researcher < writer);
    }

    #[test]
    fn combined_file_defines_children_then_root() {
        let out = render_kind(
            &research_project(OrchestrationPattern::Sequential),
            TemplateKind::CombinedAgents,
        );

        assert!(out.contains("from google.adk.agents import LlmAgent, SequentialAgent"));
        assert!(out.contains("researcher = LlmAgent("));
        assert!(out.contains("instruction=\"Research the topic\""));
        assert!(out.contains("output_key=\"research_data\""));
        assert!(out.contains("instruction=\"Write based on {research_data}\""));
        assert!(out.contains("research_coordinator = SequentialAgent("));
        assert!(out.contains("root_agent = research_coordinator"));
        assert!(!out.contains("google.adk.tools"));
        assert!(!out.contains("BaseAgent"));
        let researcher = out.find("researcher = LlmAgent(").expect("researcher defined");
        let writer = out.find("writer = LlmAgent(").expect("writer defined");
        let root = out.find("research_coordinator = ").expect("root defined");
        assert!(researcher < writer && writer < root);
    }

    #[test]
    fn loop_pattern_only_swaps_the_composition_class() {
        let sequential = render_kind(
            &research_project(OrchestrationPattern::Sequential),
            TemplateKind::CombinedAgents,
        );
        let looped = render_kind(
            &research_project(OrchestrationPattern::Loop),
            TemplateKind::CombinedAgents,
        );

        assert!(looped.contains("LoopAgent"));
        assert!(!looped.contains("SequentialAgent"));
        assert_eq!(looped.replace("LoopAgent", "SequentialAgent"), sequential);
    }

    #[test]
    fn loop_orchestrator_file_differs_only_in_composition_class() {
        let render = |pattern| {
            let project = research_project(pattern);
            let orch = project.orchestrator.as_ref().expect("orchestrator set");
            engine().render_orchestrator(orch).expect("render succeeds")
        };
        let sequential = render(OrchestrationPattern::Sequential);
        let looped = render(OrchestrationPattern::Loop);

        assert!(looped.contains("research_coordinator = LoopAgent("));
        assert!(!looped.contains("SequentialAgent"));
        assert_eq!(looped.replace("LoopAgent", "SequentialAgent"), sequential);
    }

    #[test]
    fn keyword_and_digit_names_become_valid_bindings() {
        let mut orch = Orchestrator::new("Coord", OrchestrationPattern::Sequential, "", "m");
        orch.add_sub_agent(Agent::new("class", AgentKind::Llm, "a", "", "m", Vec::new()));
        orch.add_sub_agent(Agent::new("2nd-pass", AgentKind::Llm, "b", "", "m", Vec::new()));
        let out = engine().render_orchestrator(&orch).expect("render succeeds");

        assert!(out.contains("from class_.agent import agent as class_"));
        assert!(out.contains("from _2nd_pass.agent import agent as _2nd_pass"));
        assert!(out.contains("sub_agents=[class_, _2nd_pass]"));
    }

    #[test]
    fn sub_agent_kind_is_not_project_scoped() {
        let project = research_project(OrchestrationPattern::Sequential);
        let validated = project.validated().expect("project is valid");
        let view = ProjectView::new(validated.project, validated.orchestrator);
        assert!(matches!(
            engine().render_project(TemplateKind::SubAgent, &view),
            Err(TemplateError::AgentScoped(name)) if name == "agent_single.py"
        ));
    }

    #[test]
    fn llm_coordinated_root_gets_model_and_routing_instruction() {
        let out = render_kind(
            &research_project(OrchestrationPattern::LlmCoordinated),
            TemplateKind::CombinedAgents,
        );
        assert!(out.contains("from google.adk.agents import LlmAgent\n"));
        assert!(out.contains("research_coordinator = LlmAgent("));
        assert!(out.contains("model=\"gemini-2.0-flash\""));
        assert!(out.contains("Route each request to the most suitable sub-agent: researcher, writer."));
    }

    #[test]
    fn hyphenated_names_fold_in_code_but_not_in_labels() {
        let mut orch = Orchestrator::new(
            "grafana-agent",
            OrchestrationPattern::Parallel,
            "Watches dashboards",
            "gemini-2.5-flash",
        );
        orch.add_sub_agent(Agent::new(
            "data-processor",
            AgentKind::Llm,
            "Process data",
            "",
            "gemini-2.5-flash",
            Vec::new(),
        ));
        let project = Project::new("grafana-project", orch);

        let combined = render_kind(&project, TemplateKind::CombinedAgents);
        assert!(combined.contains("grafana_agent = ParallelAgent("));
        assert!(combined.contains("name=\"grafana_agent\""));
        assert!(combined.contains("data_processor = LlmAgent("));
        assert!(!combined.contains("grafana-agent ="));
        assert!(!combined.contains("output_key"));

        let readme = render_kind(&project, TemplateKind::Readme);
        assert!(readme.contains("# grafana-project"));
        assert!(readme.contains("**grafana-agent** (Parallel)"));
        assert!(readme.contains("| data-processor | llm |"));
    }

    #[test]
    fn sub_agent_file_renders_llm_agent_with_deduplicated_tools() {
        let agent = Agent::new(
            "Researcher",
            AgentKind::Llm,
            "Research the topic",
            "research_data",
            "gemini-2.0-flash",
            vec![
                Capability::GoogleSearch,
                Capability::VertexAiSearch,
                Capability::GoogleSearch,
            ],
        );
        let out = engine().render_sub_agent(&agent).expect("render succeeds");

        assert!(out.contains("from google.adk.agents import LlmAgent"));
        assert!(out.contains("from google.adk.tools import google_search, vertex_ai_search\n"));
        assert!(out.contains("# Tools: google_search, vertex_ai_search, google_search"));
        assert!(out.contains("agent = LlmAgent("));
        assert!(out.contains("name=\"researcher\""));
        assert!(out.contains("model=\"gemini-2.0-flash\""));
        assert!(out.contains("instruction=\"Research the topic\""));
        assert!(out.contains("output_key=\"research_data\""));
        assert!(out.contains("tools=[google_search, vertex_ai_search],"));
    }

    #[test]
    fn custom_sub_agent_file_subclasses_base_agent() {
        let agent = Agent::new(
            "data-processor",
            AgentKind::Custom,
            "",
            "processed",
            "",
            vec![Capability::GoogleSearch],
        );
        let out = engine().render_sub_agent(&agent).expect("render succeeds");

        assert!(out.contains("from google.adk.agents import BaseAgent"));
        assert!(out.contains("class DataProcessor(BaseAgent):"));
        assert!(out.contains("async def _run_async_impl("));
        assert!(out.contains("agent = DataProcessor(name=\"data_processor\")"));
        assert!(!out.contains("google.adk.tools"));
        assert!(!out.contains("LlmAgent"));
    }

    #[test]
    fn quotes_in_instructions_stay_valid_python() {
        let agent = Agent::new(
            "quoter",
            AgentKind::Llm,
            "Say \"hello\"\nthen stop",
            "",
            "gemini-2.5-flash",
            Vec::new(),
        );
        let out = engine().render_sub_agent(&agent).expect("render succeeds");
        assert!(out.contains(r#"instruction="Say \"hello\"\nthen stop","#));
    }

    #[test]
    fn entrypoint_imports_the_orchestrator_package() {
        let out = render_kind(
            &research_project(OrchestrationPattern::Sequential),
            TemplateKind::Entrypoint,
        );
        assert!(out.contains("from research_coordinator.agent import root_agent"));
        assert!(out.contains("InMemoryRunner"));
        assert!(out.contains("APP_NAME = \"test_project\""));
        assert!(out.contains("if __name__ == \"__main__\":"));
    }

    #[test]
    fn requirements_always_pin_the_framework() {
        let mut project = research_project(OrchestrationPattern::Sequential);
        project.include_deploy_script = false;
        let bare = render_kind(&project, TemplateKind::Requirements);
        assert!(bare.contains("google-adk"));
        assert!(!bare.contains("google-cloud-aiplatform"));

        project.include_deploy_script = true;
        let deployable = render_kind(&project, TemplateKind::Requirements);
        assert!(deployable.contains("google-adk"));
        assert!(deployable.contains("google-cloud-aiplatform[adk,agent_engines]"));
    }

    #[test]
    fn readme_follows_project_toggles() {
        let mut project = research_project(OrchestrationPattern::Sequential);
        let readme = render_kind(&project, TemplateKind::Readme);
        assert!(readme.contains("# test-project"));
        assert!(readme.contains("pip install -r requirements.txt"));
        assert!(readme.contains("python main.py"));
        assert!(readme.contains("| Writer | llm | `draft` | - |"));
        assert!(!readme.contains("## Docker"));

        project.include_example = false;
        project.include_docker = true;
        let readme = render_kind(&project, TemplateKind::Readme);
        assert!(!readme.contains("python main.py"));
        assert!(readme.contains("docker build -t test_project ."));
    }

    #[test]
    fn deploy_script_ships_every_package() {
        let out = render_kind(
            &research_project(OrchestrationPattern::Sequential),
            TemplateKind::DeployScript,
        );
        assert!(out.contains("--staging-bucket"));
        assert!(out.contains(
            "extra_packages=[\"./research_coordinator\", \"./researcher\", \"./writer\"]"
        ));
        assert!(out.contains("display_name=\"test-project\""));
    }

    #[test]
    fn package_init_imports_the_agent_module() {
        let out = render_kind(
            &research_project(OrchestrationPattern::Sequential),
            TemplateKind::PackageInit,
        );
        assert_eq!(out.trim(), "from . import agent");
    }

    #[test]
    fn malformed_template_is_a_parse_error() {
        let err = TemplateEngine::from_sources(&[("broken.py", "{% if %}")])
            .err()
            .expect("template does not parse");
        match err {
            TemplateError::Parse { name, .. } => assert_eq!(name, "broken.py"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_and_failing_templates_are_reported() {
        let engine = TemplateEngine::from_sources(&[("needs.py", "{{ missing }}")])
            .expect("template parses");
        assert!(matches!(
            engine.render("absent.py", &serde_json::json!({})),
            Err(TemplateError::UnknownTemplate(name)) if name == "absent.py"
        ));
        assert!(matches!(
            engine.render("needs.py", &serde_json::json!({})),
            Err(TemplateError::Render { name, .. }) if name == "needs.py"
        ));
    }
}
