//! Template engine: turns a validated topology into source text.

pub mod context;
pub mod engine;
pub mod helpers;

pub use context::{AgentView, OrchestratorView, ProjectView};
pub use engine::{TemplateEngine, TemplateKind};
pub use helpers::{class_name, composition_class, composition_class_for_label, fold_identifier};
