//! tdbstats CLI - Command-line interface for temporal database statistics
//!
//! This is the main entry point for the tdbstats CLI application, providing
//! commands for summarizing temporal transactional databases and exporting
//! their distributions.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();
    control::set_override(cli.use_color());

    // Configuration is needed before logging so the [logging] section applies
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, cli.use_color()));
            process::exit(e.exit_code());
        }
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    let guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let code = match run(cli, &config, use_color) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            e.exit_code()
        }
    };

    // flush the log file before exiting
    drop(guard);
    process::exit(code);
}

/// Main application logic
#[instrument(skip_all, fields(command = cli.command.name()))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli
        .output
        .or_else(|| config.output_format())
        .unwrap_or(OutputFormat::Human);
    let mut output = OutputWriter::new(format, use_color, cli.quiet, config.output.progress);

    tracing::info!(
        command = cli.command.name(),
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Summary(args) => handlers::handle_summary(args, config, &mut output),
        Commands::Items(args) => handlers::handle_items(args, config, &mut output),
        Commands::Lengths(args) => handlers::handle_lengths(args, config, &mut output),
        Commands::Timestamps(args) => handlers::handle_timestamps(args, config, &mut output),
        Commands::Export(args) => handlers::handle_export(args, config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.merge_with_file(&config.logging, verbosity);
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
        let cli = Cli::parse_from(["tdbstats", "summary", "db.txt"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert_eq!(cli.command.name(), "summary");

        let cli = Cli::parse_from(["tdbstats", "-vv", "export", "db.txt", "--dir", "out"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.command.name(), "export");

        let cli = Cli::parse_from(["tdbstats", "-o", "json", "timestamps", "db.txt"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }
}
