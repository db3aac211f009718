//! Formcheck CLI - Command-line interface for declarative field validation
//!
//! This is the main entry point for the Formcheck CLI application, providing
//! commands for validating records, inspecting rule expressions and browsing
//! the rule catalog.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so its logging section applies
    let config = Config::load_with_file(cli.config.as_deref());
    let file_logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    // Initialize logging; the guard flushes file output on drop
    let log_guard = match init_logging(&cli, &file_logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    // Set up colored output
    let use_color = cli.use_color() && config.as_ref().map(|c| c.output.color).unwrap_or(true);
    control::set_override(use_color);

    let result = config.and_then(|config| run(cli, &config, use_color));

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{}", error::format_error(&e, use_color));
            }

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            e.exit_code()
        }
    };

    drop(log_guard);
    process::exit(code);
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = resolve_output_format(cli.output, config)?;
    let mut output = OutputWriter::new(format, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Parse(args) => handlers::handle_parse(args, config, &mut output),
        Commands::Rules(args) => handlers::handle_rules(args, config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// `--output` wins; otherwise the config's `output.format`
fn resolve_output_format(flag: Option<OutputFormat>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(format) => Ok(format),
        None => OutputFormat::from_config(&config.output.format).ok_or_else(|| {
            Error::config(format!(
                "output.format: unknown format \"{}\" (expected human, json, json-pretty or yaml)",
                config.output.format
            ))
        }),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, file_logging: &config::LoggingConfig) -> Result<Option<WorkerGuard>> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Config file first, then environment overrides
    logging_config.merge_with_file(file_logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["formcheck", "rules"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["formcheck", "-vv", "validate", "record.json", "-r", "rules.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["formcheck", "--quiet", "parse", "required"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_resolve_output_format() {
        let mut config = Config::default();
        assert_eq!(resolve_output_format(None, &config).unwrap(), OutputFormat::Human);
        assert_eq!(
            resolve_output_format(Some(OutputFormat::Yaml), &config).unwrap(),
            OutputFormat::Yaml
        );

        config.output.format = "json".to_string();
        assert_eq!(resolve_output_format(None, &config).unwrap(), OutputFormat::Json);

        config.output.format = "xml".to_string();
        let err = resolve_output_format(None, &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
