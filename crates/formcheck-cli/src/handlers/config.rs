//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::PathBuf;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = if args.user {
        Config::user_config_dir()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?
            .join("config.yaml")
    } else {
        args.path.unwrap_or_else(|| PathBuf::from(".formcheck.yaml"))
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Add a `messages` section to override rule messages, e.g. required: \"Please fill in %field.\"")?;
    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = render_config(config, args.format)?;
    output.writeln(content.trim_end())
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    Ok(match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Handle config path subcommand
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    if let Ok(path) = std::env::var("FORMCHECK_CONFIG") {
        output.writeln(&format!("FORMCHECK_CONFIG: {}", path))?;
    }

    let mut active_found = false;
    for path in Config::default_config_paths() {
        let marker = if path.exists() && !active_found {
            active_found = true;
            "✓ (active)"
        } else if path.exists() {
            "✓"
        } else {
            "✗"
        };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }

    if !active_found {
        output.info("No config file found, using defaults")?;
    }
    Ok(())
}
