use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::model::{BuilderDefaults, DEFAULT_MODEL};

/// Resolved settings for one invocation. Built once in `main`, then only read.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub profile: String,
    pub config_path: String,
    pub defaults: BuilderDefaults,
    pub gcp_project_id: Option<String>,
    pub gcp_region: Option<String>,
    pub staging_bucket: Option<String>,
    pub use_gcloud: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub default_model: Option<String>,
    pub output_root: Option<PathBuf>,
    pub include_example: Option<bool>,
    pub include_readme: Option<bool>,
    pub include_docker: Option<bool>,
    pub include_deploy_script: Option<bool>,
    pub gcp_project_id: Option<String>,
    pub gcp_region: Option<String>,
    pub staging_bucket: Option<String>,
    pub use_gcloud: Option<bool>,
}

pub fn load_profiles(config_path: &str) -> Result<ProfilesFile> {
    let path = Path::new(config_path);
    if !path.exists() {
        return Ok(ProfilesFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile config file at '{}'", path.display()))?;
    toml::from_str::<ProfilesFile>(&content).with_context(|| {
        format!(
            "invalid profile configuration in '{}'. Check field names and value types.",
            path.display()
        )
    })
}

pub fn resolve_runtime_config(cli: &Cli, profiles: &ProfilesFile) -> Result<RuntimeConfig> {
    let selected = cli.profile.trim();
    if selected.is_empty() {
        return Err(anyhow::anyhow!(
            "profile name cannot be empty. Set --profile <name>."
        ));
    }

    let profile = if selected == "default" && !profiles.profiles.contains_key("default") {
        ProfileConfig::default()
    } else {
        profiles.profiles.get(selected).cloned().ok_or_else(|| {
            let mut names = profiles.profiles.keys().cloned().collect::<Vec<String>>();
            names.sort();
            if names.is_empty() {
                anyhow::anyhow!(
                    "profile '{}' not found in '{}'. No profiles are defined yet.",
                    selected,
                    cli.config_path
                )
            } else {
                anyhow::anyhow!(
                    "profile '{}' not found in '{}'. Available profiles: {}",
                    selected,
                    cli.config_path,
                    names.join(", ")
                )
            }
        })?
    };

    let builtin = BuilderDefaults::default();
    let default_model = cli
        .model
        .clone()
        .or(profile.default_model)
        .map(|model| model.trim().to_string())
        .filter(|model| !model.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(RuntimeConfig {
        profile: selected.to_string(),
        config_path: cli.config_path.clone(),
        defaults: BuilderDefaults {
            default_model,
            output_root: profile.output_root,
            include_example: profile.include_example.unwrap_or(builtin.include_example),
            include_readme: profile.include_readme.unwrap_or(builtin.include_readme),
            include_docker: profile.include_docker.unwrap_or(builtin.include_docker),
            include_deploy_script: profile
                .include_deploy_script
                .unwrap_or(builtin.include_deploy_script),
        },
        gcp_project_id: non_empty(profile.gcp_project_id),
        gcp_region: non_empty(profile.gcp_region),
        staging_bucket: non_empty(profile.staging_bucket),
        use_gcloud: profile.use_gcloud.unwrap_or(true),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
