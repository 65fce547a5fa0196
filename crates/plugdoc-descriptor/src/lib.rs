//! Plugin descriptor utilities.
//!
//! Peers of the markup engine used when generating plugin descriptors:
//! - [`write_dependencies`]: compact `<dependencies>` XML fragment
//! - [`SourceScanner`] / [`find_sources`]: include/exclude file discovery
//! - [`goal_prefix_from_artifact_id`]: goal prefix derivation

mod dependencies;
mod error;
mod goal;
mod sources;

pub use dependencies::{Dependency, write_dependencies};
pub use error::DescriptorError;
pub use goal::goal_prefix_from_artifact_id;
pub use sources::{SourceScanner, find_sources};
