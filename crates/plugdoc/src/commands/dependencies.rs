//! `plugdoc dependencies` command implementation.

use std::path::Path;

use plugdoc_config::Config;
use plugdoc_descriptor::write_dependencies;

use crate::error::CliError;
use crate::output::Output;

pub(crate) fn execute(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = Config::load(config_path, None)?;
    let xml = write_dependencies(&config.dependencies)?;
    Output::new().result(&xml)?;
    Ok(())
}
