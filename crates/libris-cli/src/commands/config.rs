//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use libris_core::{Config, Role};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "database": config.database_path(),
                    "log_file": config.log_file,
                    "seed_demo_data": config.seed_demo_data,
                    "role": config.role,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:       {}", config.data_dir.display());
            println!(
                "  log_file:       {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  seed_demo_data: {}", config.seed_demo_data);
            println!("  role:           {}", config.role);
            println!();
            println!("Database:    {}", config.database_path().display());
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "seed_demo_data" => {
            config.seed_demo_data = value
                .parse()
                .context("Invalid value for seed_demo_data. Use 'true' or 'false'.")?;
        }
        "role" => {
            config.role = value
                .parse::<Role>()
                .map_err(anyhow::Error::msg)
                .context("Invalid value for role")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, log_file, seed_demo_data, role",
                key
            );
        }
    }
    Ok(())
}
