use anyhow::Result;

use crate::catalog;
use crate::generator::composition_class;
use crate::model::OrchestrationPattern;
use crate::theme;

pub fn pattern_lines() -> Vec<String> {
    let width = OrchestrationPattern::ALL
        .iter()
        .map(|pattern| pattern.label().len())
        .max()
        .unwrap_or(0);
    OrchestrationPattern::ALL
        .iter()
        .map(|pattern| {
            format!(
                "  {:<width$}  {}  {}",
                pattern.label(),
                pattern.description(),
                theme::dim(&format!(
                    "[{}, blueprint key: {}]",
                    composition_class(*pattern),
                    pattern.key()
                ))
            )
        })
        .collect()
}

pub fn tool_lines() -> Vec<String> {
    let capabilities = catalog::list_all();
    let width = capabilities
        .iter()
        .map(|capability| capability.id().len())
        .max()
        .unwrap_or(0);
    capabilities
        .iter()
        .map(|capability| {
            format!(
                "  {:<width$}  {}",
                capability.id(),
                capability.description()
            )
        })
        .collect()
}

pub fn run_patterns() -> Result<()> {
    println!("{}", theme::heading("Orchestration patterns"));
    for line in pattern_lines() {
        println!("{line}");
    }
    Ok(())
}

pub fn run_tools() -> Result<()> {
    println!("{}", theme::heading("ADK tools for LLM agents"));
    for line in tool_lines() {
        println!("{line}");
    }
    Ok(())
}
