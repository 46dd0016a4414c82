// Rust guideline compliant 2026-10-18

//! Trackshift CLI Application
//!
//! Command-line interface for moving YouTrack projects into Jira.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use trackshift_cli::commands;
use trackshift_cli::logging::init_logging;
use trackshift_cli::{should_use_color, Cli, Commands, Console};
use trackshift_core::Config;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _guard = init_logging(&cli.log_level, cli.log_file.as_deref())?;
    let console = Console::new(should_use_color(cli.no_color));

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let all_succeeded = match &cli.command {
        Commands::Convert { projects } => commands::convert::execute(&config, projects, &console)?.is_success(),
        Commands::Download { projects } => commands::download::execute(&config, projects, &console)?.is_success(),
    };

    Ok(if all_succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
