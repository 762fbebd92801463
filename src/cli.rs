use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    #[command(about = "List configured profiles and highlight the active profile")]
    List,
    #[command(about = "Show the active profile's resolved settings")]
    Show,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    #[arg(long, default_value_t = false, help = "Scaffold a single agent instead of a project")]
    pub single: bool,

    #[arg(
        long,
        default_value_t = false,
        conflicts_with = "single",
        help = "Put every agent in the orchestrator's agent.py"
    )]
    pub combined: bool,

    #[arg(long, help = "Read the topology from a TOML blueprint instead of prompting")]
    pub blueprint: Option<PathBuf>,

    #[arg(long, help = "Output directory (default: ./<project-name>)")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Skip main.py")]
    pub no_example: bool,

    #[arg(long, default_value_t = false, help = "Skip README.md")]
    pub no_readme: bool,

    #[arg(long, default_value_t = false, help = "Generate a Dockerfile")]
    pub docker: bool,

    #[arg(long, default_value_t = false, help = "Skip deploy.py")]
    pub no_deploy_script: bool,

    #[arg(long, default_value_t = false, help = "Print the planned files without writing")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DeployArgs {
    #[arg(long, env = "AGENT_BUILDER_GCP_PROJECT")]
    pub project_id: Option<String>,

    #[arg(long, env = "AGENT_BUILDER_GCP_REGION")]
    pub region: Option<String>,

    #[arg(long, env = "AGENT_BUILDER_STAGING_BUCKET")]
    pub staging_bucket: Option<String>,
}

const CLI_EXAMPLES: &str = "Examples:\n\
  agent-builder create\n\
  agent-builder create --single\n\
  agent-builder create --blueprint research.toml --output-dir ./research --docker\n\
  agent-builder create --blueprint research.toml --dry-run\n\
  agent-builder patterns\n\
  agent-builder tools\n\
  agent-builder deploy --project-id my-project --region us-central1 --staging-bucket gs://my-bucket\n\
  agent-builder --profile team profiles show\n\
  agent-builder doctor\n\
\n\
Configuration:\n\
  - Profiles live in .agent-builder/config.toml under [profiles.<name>].\n\
  - Command-line flags override environment variables, which override the active profile.";

#[derive(Debug, Parser)]
#[command(name = "agent-builder")]
#[command(version)]
#[command(about = "Scaffold ADK multi-agent projects from an interactive interview")]
#[command(after_long_help = CLI_EXAMPLES)]
pub struct Cli {
    #[arg(long, env = "AGENT_BUILDER_PROFILE", default_value = "default")]
    pub profile: String,

    #[arg(
        long,
        env = "AGENT_BUILDER_CONFIG",
        default_value = ".agent-builder/config.toml"
    )]
    pub config_path: String,

    #[arg(long, env = "AGENT_BUILDER_MODEL", help = "Default model offered at model prompts")]
    pub model: Option<String>,

    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Interactively scaffold a multi-agent project or a single agent")]
    Create(CreateArgs),
    #[command(about = "List the orchestration patterns")]
    Patterns,
    #[command(about = "List the ADK tools that can be granted to LLM agents")]
    Tools,
    #[command(about = "Deploy the project in the current directory to Vertex AI Agent Engine")]
    Deploy(DeployArgs),
    #[command(about = "Inspect profile configuration and the active resolved profile")]
    Profiles {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    #[command(about = "Check for python3, gcloud and adk and show the resolved configuration")]
    Doctor,
}
