//! refdoc command-line tool
//!
//! Resolves the documentation options of a project and turns declaration
//! records into a serialized reflection tree.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Flags of the tool itself go before the subcommand. Everything after it is
/// handed to option discovery, so names such as `--strict` or `-h` reach the
/// documentation options.
#[derive(Parser)]
#[command(name = "refdoc")]
#[command(about = "Documentation option discovery and reflection trees", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,

    /// Report unknown options as errors instead of warnings
    #[arg(long)]
    strict_options: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_parser = ["auto", "always", "never"])]
    color: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve options and print the configuration as JSON
    #[command(disable_help_flag = true)]
    Config {
        /// Tool options and input files, e.g. `--out docs src/index.ts`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Build a reflection tree from declaration records and write it as JSON
    #[command(disable_help_flag = true)]
    Json {
        /// JSON file holding an array of declaration records
        declarations: PathBuf,

        /// Tool options and input files
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = commands::Settings {
        strict: cli.strict_options,
        color: output::resolve_color_choice(cli.color.as_deref()),
    };

    let ok = match cli.command {
        Commands::Config { args } => commands::config::execute(&settings, args)?,
        Commands::Json { declarations, args } => {
            commands::json::execute(&settings, &declarations, args)?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
