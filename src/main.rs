use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;

use agent_builder::cli::{Cli, Commands, ProfileCommands};
use agent_builder::config::{load_profiles, resolve_runtime_config};
use agent_builder::create::run_create;
use agent_builder::deploy::run_deploy;
use agent_builder::doctor::run_doctor;
use agent_builder::error::{categorize_error, format_cli_error};
use agent_builder::patterns::{run_patterns, run_tools};
use agent_builder::profiles::{run_profiles_list, run_profiles_show};

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = run_cli(cli) {
        eprintln!("{}", format_cli_error(&err));
        tracing::error!(category = %categorize_error(&err).code(), error = %err, "command failed");
        std::process::exit(1);
    }

    Ok(())
}

fn run_cli(cli: Cli) -> Result<()> {
    init_tracing(&cli.log_filter)?;
    let profiles = load_profiles(&cli.config_path)?;
    let cfg = resolve_runtime_config(&cli, &profiles)?;
    tracing::debug!(profile = %cfg.profile, model = %cfg.defaults.default_model, "Resolved configuration");

    match cli.command {
        Commands::Create(args) => run_create(&cfg, &args)?,
        Commands::Patterns => run_patterns()?,
        Commands::Tools => run_tools()?,
        Commands::Deploy(args) => run_deploy(&cfg, &args)?,
        Commands::Profiles { command } => match command {
            ProfileCommands::List => run_profiles_list(&profiles, &cfg)?,
            ProfileCommands::Show => run_profiles_show(&cfg)?,
        },
        Commands::Doctor => run_doctor(&cfg)?,
    }

    Ok(())
}

fn init_tracing(log_filter: &str) -> Result<()> {
    let level = log_filter
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_env_filter(log_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}
