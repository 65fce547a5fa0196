//! CLI error types.

use plugdoc_config::ConfigError;
use plugdoc_descriptor::DescriptorError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Descriptor(#[from] DescriptorError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
