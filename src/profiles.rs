use anyhow::Result;

use crate::config::{ProfilesFile, RuntimeConfig};

pub fn profile_names(profiles: &ProfilesFile) -> Vec<String> {
    let mut names = profiles.profiles.keys().cloned().collect::<Vec<String>>();
    if !names.iter().any(|name| name == "default") {
        names.push("default".to_string());
    }
    names.sort();
    names
}

pub fn run_profiles_list(profiles: &ProfilesFile, cfg: &RuntimeConfig) -> Result<()> {
    println!("Configured profiles (active='{}'):", cfg.profile);
    for name in profile_names(profiles) {
        let marker = if name == cfg.profile { "*" } else { " " };
        let source = if profiles.profiles.contains_key(&name) {
            "configured"
        } else {
            "implicit"
        };
        println!("{marker} {name} ({source})");
    }

    Ok(())
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("<not configured>")
}

pub fn run_profiles_show(cfg: &RuntimeConfig) -> Result<()> {
    println!("Active profile: {}", cfg.profile);
    println!("Config path: {}", cfg.config_path);
    println!("Default model: {}", cfg.defaults.default_model);
    println!(
        "Output root: {}",
        cfg.defaults
            .output_root
            .as_ref()
            .map(|root| root.display().to_string())
            .unwrap_or_else(|| "<current directory>".to_string())
    );
    println!("Include example main.py: {}", cfg.defaults.include_example);
    println!("Include README.md: {}", cfg.defaults.include_readme);
    println!("Include Dockerfile: {}", cfg.defaults.include_docker);
    println!("Include deploy.py: {}", cfg.defaults.include_deploy_script);
    println!("GCP project: {}", or_unset(cfg.gcp_project_id.as_deref()));
    println!("GCP region: {}", or_unset(cfg.gcp_region.as_deref()));
    println!("Staging bucket: {}", or_unset(cfg.staging_bucket.as_deref()));
    println!("Use gcloud defaults: {}", cfg.use_gcloud);
    Ok(())
}
