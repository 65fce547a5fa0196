//! `plugdoc goal-prefix` command implementation.

use clap::Args;
use plugdoc_descriptor::goal_prefix_from_artifact_id;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the goal-prefix command.
#[derive(Args)]
pub(crate) struct GoalPrefixArgs {
    /// Plugin artifact id, e.g. `maven-compiler-plugin`.
    artifact_id: String,
}

impl GoalPrefixArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        Output::new().result(&goal_prefix_from_artifact_id(&self.artifact_id))?;
        Ok(())
    }
}
