//! Interactive interview that collects the primitive values the domain
//! constructors need.
//!
//! The prompter works over any `BufRead`/`Write` pair so tests can script a
//! whole session with a `Cursor`. Invalid answers are reported and asked
//! again; only closed input is an error.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::{self, Capability};
use crate::model::{
    AVAILABLE_MODELS, Agent, AgentKind, BuilderDefaults, OrchestrationPattern, Orchestrator,
    Project, is_name_token, project::default_output_dir,
};
use crate::theme::{CYAN, DIM, RESET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Full,
    Single,
}

impl ProjectType {
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::Full => "Full project (orchestrator + sub-agents)",
            ProjectType::Single => "Single agent",
        }
    }
}

/// Answers supplied on the command line; each one skips its question.
#[derive(Debug, Clone, Default)]
pub struct InterviewOverrides {
    pub output_dir: Option<PathBuf>,
    pub include_example: Option<bool>,
    pub include_docker: Option<bool>,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("failed to write prompt")
    }

    fn read_answer(&mut self) -> Result<String> {
        self.output.flush().context("failed to write prompt")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Err(anyhow::anyhow!(
                "failed to read input: input closed before the interview finished"
            ));
        }
        Ok(line.trim().to_string())
    }

    /// Free-text question; an empty answer takes `default` when one is given.
    pub fn ask(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        let written = match default {
            Some(default) if !default.is_empty() => {
                write!(self.output, "{CYAN}?{RESET} {label} {DIM}({default}){RESET}: ")
            }
            _ => write!(self.output, "{CYAN}?{RESET} {label}: "),
        };
        written.context("failed to write prompt")?;

        let answer = self.read_answer()?;
        if answer.is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }
        Ok(answer)
    }

    /// Repeats the question until `check` accepts the answer.
    pub fn ask_valid<V>(&mut self, label: &str, default: Option<&str>, check: V) -> Result<String>
    where
        V: Fn(&str) -> std::result::Result<(), String>,
    {
        loop {
            let answer = self.ask(label, default)?;
            match check(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.say(&format!("  {reason}"))?,
            }
        }
    }

    pub fn confirm(&mut self, label: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "{CYAN}?{RESET} {label} {DIM}[{hint}]{RESET}: ")
                .context("failed to write prompt")?;
            let answer = self.read_answer()?;
            match parse_confirm(&answer, default) {
                Some(value) => return Ok(value),
                None => self.say("  Please answer y or n.")?,
            }
        }
    }

    /// Numbered single choice. `options` are `(label, description)` pairs.
    pub fn select(&mut self, label: &str, options: &[(&str, &str)], default: usize) -> Result<usize> {
        self.say(&format!("{CYAN}?{RESET} {label}"))?;
        for (idx, (name, description)) in options.iter().enumerate() {
            if description.is_empty() {
                self.say(&format!("  {}) {name}", idx + 1))?;
            } else {
                self.say(&format!("  {}) {name} {DIM}- {description}{RESET}", idx + 1))?;
            }
        }
        loop {
            write!(self.output, "  Choose 1-{} {DIM}({}){RESET}: ", options.len(), default + 1)
                .context("failed to write prompt")?;
            let answer = self.read_answer()?;
            match resolve_selection(options, &answer, default) {
                Ok(idx) => return Ok(idx),
                Err(err) => self.say(&format!("  {err}"))?,
            }
        }
    }

    pub fn collect_project_type(&mut self) -> Result<ProjectType> {
        let types = [ProjectType::Full, ProjectType::Single];
        let options = types
            .iter()
            .map(|kind| (kind.label(), ""))
            .collect::<Vec<_>>();
        let idx = self.select("What do you want to create?", &options, 0)?;
        Ok(types[idx])
    }

    pub fn collect_model(&mut self, label: &str, default_model: &str) -> Result<String> {
        self.say(&format!(
            "  {DIM}Available: {}{RESET}",
            AVAILABLE_MODELS.join(", ")
        ))?;
        self.ask_valid(label, Some(default_model), |value| {
            if value.trim().is_empty() {
                Err("Model cannot be empty.".to_string())
            } else {
                Ok(())
            }
        })
    }

    pub fn collect_capabilities(&mut self) -> Result<Vec<Capability>> {
        if !self.confirm("Add ADK tools?", false)? {
            return Ok(Vec::new());
        }
        self.say("  Available tools:")?;
        for (idx, capability) in catalog::list_all().into_iter().enumerate() {
            self.say(&format!(
                "  {:>2}) {} {DIM}- {}{RESET}",
                idx + 1,
                capability.id(),
                capability.description()
            ))?;
        }
        loop {
            let answer = self.ask("Tools (comma-separated numbers or names, empty for none)", None)?;
            match resolve_capability_selection(&answer) {
                Ok(capabilities) => return Ok(capabilities),
                Err(err) => self.say(&format!("  {err}"))?,
            }
        }
    }

    /// One agent: name, kind, instruction (LLM only), output key, model,
    /// then tools (LLM only).
    pub fn collect_agent(&mut self, number: Option<usize>, default_model: &str) -> Result<Agent> {
        let heading = match number {
            Some(number) => format!("Sub-agent #{number}"),
            None => "Agent".to_string(),
        };
        self.say(&format!("\n{}", crate::theme::heading(&heading)))?;

        let name = self.ask_valid("Agent name", None, check_name)?;
        let kinds = AgentKind::ALL
            .iter()
            .map(|kind| (kind.prompt_label(), ""))
            .collect::<Vec<_>>();
        let kind = AgentKind::ALL[self.select("Agent type", &kinds, 0)?];

        let instruction = if kind == AgentKind::Llm {
            self.ask_valid("Instruction", None, |value| {
                if value.trim().is_empty() {
                    Err("Instruction is required for LLM agents.".to_string())
                } else {
                    Ok(())
                }
            })?
        } else {
            String::new()
        };
        let output_key = self.ask("Output key (optional)", None)?;
        let model = self.collect_model("Model", default_model)?;
        let capabilities = if kind == AgentKind::Llm {
            self.collect_capabilities()?
        } else {
            Vec::new()
        };

        Ok(Agent::new(name, kind, instruction, output_key, model, capabilities))
    }

    /// Full interview in the fixed order the domain model expects.
    pub fn collect_project(
        &mut self,
        defaults: &BuilderDefaults,
        overrides: &InterviewOverrides,
    ) -> Result<Project> {
        let name = self.ask_valid("Project name", None, check_name)?;

        let patterns = OrchestrationPattern::ALL
            .iter()
            .map(|pattern| (pattern.label(), pattern.description()))
            .collect::<Vec<_>>();
        let pattern = OrchestrationPattern::ALL[self.select("Orchestration pattern", &patterns, 0)?];

        self.say(&format!("\n{}", crate::theme::heading("Orchestrator")))?;
        let orchestrator_name = self.ask_valid("Orchestrator name", Some("coordinator"), check_name)?;
        let description = self.ask("Description", Some("Coordinates the sub-agents"))?;
        let model = self.collect_model("Orchestrator model", &defaults.default_model)?;
        let mut orchestrator = Orchestrator::new(orchestrator_name, pattern, description, model);

        loop {
            let number = orchestrator.sub_agents.len() + 1;
            let agent = self.collect_agent(Some(number), &defaults.default_model)?;
            orchestrator.add_sub_agent(agent);
            if !self.confirm("Add another sub-agent?", true)? {
                break;
            }
        }

        let mut project = Project::with_defaults(name, orchestrator, defaults);
        project.output_dir = match overrides.output_dir.clone() {
            Some(dir) => dir,
            None => {
                let fallback = default_output_dir(&project.name, defaults)
                    .display()
                    .to_string();
                PathBuf::from(self.ask("Output directory", Some(fallback.as_str()))?)
            }
        };
        project.include_example = match overrides.include_example {
            Some(value) => value,
            None => self.confirm("Generate example main.py?", defaults.include_example)?,
        };
        project.include_docker = match overrides.include_docker {
            Some(value) => value,
            None => self.confirm("Generate Dockerfile?", defaults.include_docker)?,
        };
        Ok(project)
    }
}

fn check_name(value: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        Err("Name cannot be empty.".to_string())
    } else if !is_name_token(value) {
        Err("Use only letters, numbers, hyphens, and underscores.".to_string())
    } else {
        Ok(())
    }
}

/// `None` when the answer is neither yes nor no.
pub fn parse_confirm(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// 1-based number or case-insensitive option label; empty picks `default`.
pub fn resolve_selection(options: &[(&str, &str)], answer: &str, default: usize) -> Result<usize> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    if let Ok(index) = trimmed.parse::<usize>() {
        if index == 0 || index > options.len() {
            return Err(anyhow::anyhow!(
                "invalid selection '{}'; expected 1-{}",
                trimmed,
                options.len()
            ));
        }
        return Ok(index - 1);
    }

    options
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| anyhow::anyhow!("invalid selection '{}'", trimmed))
}

/// Comma-separated catalog numbers and/or identifiers, in the order given.
pub fn resolve_capability_selection(answer: &str) -> Result<Vec<Capability>> {
    let all = catalog::list_all();
    let mut selected = Vec::new();
    for token in answer.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let capability = match token.parse::<usize>() {
            Ok(index) if index >= 1 && index <= all.len() => all[index - 1],
            Ok(_) => {
                return Err(anyhow::anyhow!(
                    "invalid selection '{}'; expected 1-{}",
                    token,
                    all.len()
                ));
            }
            Err(_) => Capability::from_id(token)
                .ok_or_else(|| anyhow::anyhow!("invalid selection '{}': unknown tool", token))?,
        };
        selected.push(capability);
    }
    Ok(selected)
}
