//! `plugdoc html` and `plugdoc text` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use plugdoc_config::{CliSettings, Config};
use plugdoc_markup::{Converter, Target};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the conversion commands.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// File holding the comment body (default: read stdin).
    file: Option<PathBuf>,

    /// Print markup repair diagnostics to stderr.
    #[arg(long)]
    warnings: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self, target: Target, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            diagnostics: self.warnings.then_some(true),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let doc = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => std::io::read_to_string(std::io::stdin())?,
        };

        let mut converter = if config.markup.diagnostics {
            Converter::new().with_diagnostics()
        } else {
            Converter::new()
        };
        let converted = match target {
            Target::Html => converter.html(Some(&doc)),
            Target::Text => converter.text(Some(&doc)),
        };

        for warning in converter.take_warnings() {
            output.warning(&format!("warning: {warning}"));
        }
        output.result(&converted)?;
        Ok(())
    }
}
