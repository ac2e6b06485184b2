//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Progressive-enhancement behaviors for static sites, run headlessly
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "glint.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default config file
    #[command(visible_alias = "i")]
    Init {
        /// Directory to write into (default: current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,

        /// Print the config instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Attach to a page and report which behaviors bind
    #[command(visible_alias = "c")]
    Check {
        /// HTML page to check
        #[arg(value_hint = clap::ValueHint::FilePath)]
        page: PathBuf,
    },

    /// Run a scripted session against a page
    #[command(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: RunArgs,
    },
}

/// Run command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// HTML page to run against
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub page: PathBuf,

    /// Session file with page setup and steps (default: attach only)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub session: Option<PathBuf>,

    /// Output the resulting document or a JSON snapshot
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "glint", "-v", "run", "index.html", "-s", "scroll.toml", "--format", "json",
        ]);
        assert!(cli.verbose);
        let Commands::Run { args } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.page, PathBuf::from("index.html"));
        assert_eq!(args.session, Some(PathBuf::from("scroll.toml")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["glint", "check", "index.html", "-C", "site/glint.toml"]);
        assert_eq!(cli.config, PathBuf::from("site/glint.toml"));
        assert!(matches!(cli.command, Commands::Check { .. }));
    }
}
