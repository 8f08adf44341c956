//! CLI error types.

use confvault_config::ConfigError;
use confvault_confluence::RestoreError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Restore(#[from] RestoreError),
}
