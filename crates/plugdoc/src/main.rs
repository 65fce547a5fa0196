//! plugdoc CLI - Plugin documentation toolkit.
//!
//! Provides commands for:
//! - `html` / `text`: Convert a documentation comment
//! - `sources`: List source files matching the configured patterns
//! - `dependencies`: Print the dependency descriptor fragment
//! - `goal-prefix`: Derive a goal prefix from an artifact id

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, GoalPrefixArgs, SourcesArgs};
use output::Output;
use plugdoc_markup::Target;

/// plugdoc - Plugin documentation toolkit.
#[derive(Parser)]
#[command(name = "plugdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (default: auto-discover plugdoc.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a documentation comment to balanced HTML.
    Html(ConvertArgs),
    /// Convert a documentation comment to plain text.
    Text(ConvertArgs),
    /// List source files under the configured base directory.
    Sources(SourcesArgs),
    /// Print the configured dependencies as an XML fragment.
    Dependencies,
    /// Derive a goal prefix from an artifact id.
    GoalPrefix(GoalPrefixArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Html(args) => args.execute(Target::Html, config),
        Commands::Text(args) => args.execute(Target::Text, config),
        Commands::Sources(args) => args.execute(config),
        Commands::Dependencies => commands::dependencies::execute(config),
        Commands::GoalPrefix(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
