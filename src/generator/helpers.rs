//! Identifier folding and import aggregation used by every template.

use std::collections::BTreeSet;

use crate::catalog::Capability;
use crate::model::{Agent, AgentKind, OrchestrationPattern};

/// Construct every LLM agent is built from.
pub const BASE_AGENT_CLASS: &str = "LlmAgent";
/// Construct custom (non-LLM) agents subclass.
pub const CUSTOM_AGENT_CLASS: &str = "BaseAgent";

/// Reserved words that cannot name a module or a binding.
const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Fold a human-entered name into a snake_case code identifier.
///
/// Hyphens become underscores, an underscore is inserted at each lower→upper
/// boundary (and before the last capital of an acronym that starts a new word),
/// then everything is lower-cased. A leading digit gets a `_` prefix and a
/// Python keyword gets a `_` suffix. Already-folded input is returned unchanged.
pub fn fold_identifier(name: &str) -> String {
    let chars = name.replace('-', "_").chars().collect::<Vec<char>>();
    let mut out = String::with_capacity(chars.len() + 4);

    for (idx, &ch) in chars.iter().enumerate() {
        if idx > 0 && ch.is_ascii_uppercase() {
            let prev = chars[idx - 1];
            let next = chars.get(idx + 1).copied();
            let word_start = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let acronym_end = prev.is_ascii_uppercase() && next.is_some_and(|c| c.is_ascii_lowercase());
            if word_start || acronym_end {
                out.push('_');
            }
        }
        out.push(ch);
    }

    let mut ident = out.to_lowercase();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if PYTHON_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// PascalCase class name for a custom agent, derived from the folded identifier.
pub fn class_name(name: &str) -> String {
    let class = fold_identifier(name)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<String>();
    if class.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{class}")
    } else {
        class
    }
}

pub fn composition_class(pattern: OrchestrationPattern) -> &'static str {
    match pattern {
        OrchestrationPattern::Sequential => "SequentialAgent",
        OrchestrationPattern::Parallel => "ParallelAgent",
        OrchestrationPattern::LlmCoordinated => "LlmAgent",
        OrchestrationPattern::Loop => "LoopAgent",
    }
}

/// Composition class for a raw pattern string; unknown values fall back to `SequentialAgent`.
pub fn composition_class_for_label(raw: &str) -> &'static str {
    OrchestrationPattern::from_key(raw)
        .map(composition_class)
        .unwrap_or("SequentialAgent")
}

/// `google.adk.agents` imports for a file that defines the root and its children.
///
/// The base LLM construct is always first; the root's construct follows when
/// it differs, and `BaseAgent` is added when any child is custom.
pub fn agent_class_imports(pattern: OrchestrationPattern, agents: &[Agent]) -> Vec<&'static str> {
    let mut imports = vec![BASE_AGENT_CLASS];
    push_unique(&mut imports, composition_class(pattern));
    if agents.iter().any(|agent| agent.kind == AgentKind::Custom) {
        push_unique(&mut imports, CUSTOM_AGENT_CLASS);
    }
    imports
}

fn push_unique(imports: &mut Vec<&'static str>, name: &'static str) {
    if !imports.contains(&name) {
        imports.push(name);
    }
}

/// Capability identifiers to import: duplicates removed, first occurrence wins.
pub fn capability_imports(capabilities: &[Capability]) -> Vec<&'static str> {
    let mut seen = BTreeSet::<Capability>::new();
    capabilities
        .iter()
        .filter(|capability| seen.insert(**capability))
        .map(|capability| capability.id())
        .collect()
}

/// Capability identifiers for display: every entry, in the order given.
pub fn capability_listing(capabilities: &[Capability]) -> Vec<&'static str> {
    capabilities.iter().map(|capability| capability.id()).collect()
}

/// Capability imports across several agents, deduplicated in agent order.
pub fn combined_capability_imports(agents: &[Agent]) -> Vec<&'static str> {
    let all = agents
        .iter()
        .filter(|agent| agent.kind == AgentKind::Llm)
        .flat_map(|agent| agent.capabilities.iter().copied())
        .collect::<Vec<Capability>>();
    capability_imports(&all)
}

/// Escape text for a double-quoted Python string literal.
pub fn py_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
