//! `plugdoc sources` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use plugdoc_config::{CliSettings, Config};
use plugdoc_descriptor::SourceScanner;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sources command.
#[derive(Args)]
pub(crate) struct SourcesArgs {
    /// Directory to scan (overrides config).
    #[arg(short, long)]
    basedir: Option<PathBuf>,

    /// Include pattern, repeatable (overrides config).
    #[arg(long = "include")]
    includes: Vec<String>,

    /// Exclude pattern, repeatable (overrides config).
    #[arg(long = "exclude")]
    excludes: Vec<String>,
}

impl SourcesArgs {
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            basedir: self.basedir,
            includes: (!self.includes.is_empty()).then_some(self.includes),
            excludes: (!self.excludes.is_empty()).then_some(self.excludes),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let sources = &config.sources_resolved;

        tracing::info!(basedir = %sources.basedir.display(), "Scanning sources");
        let files = SourceScanner::new(&sources.basedir, &sources.includes)?
            .with_excludes(&sources.excludes)?
            .scan();

        for file in &files {
            output.result(file)?;
        }
        Ok(())
    }
}
