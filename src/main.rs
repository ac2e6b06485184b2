//! Glint command line: scaffold a config, check a page, run a session.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use glint::cli::{self, Cli, Commands};
use glint::config::GlintConfig;
use glint::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        // `init` writes the config, so it must not load one
        Commands::Init { dir, dry } => cli::init::init_config(dir.as_deref(), &cli.config, *dry),
        Commands::Check { page } => cli::check::check_page(page, &GlintConfig::load(&cli.config)?),
        Commands::Run { args } => cli::run::run_session(args, &GlintConfig::load(&cli.config)?),
    }
}
