//! Error types.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The defeat limit must be at least one turn.
    #[error("rounds_until_defeat must be positive, got {0}")]
    InvalidRoundLimit(u32),

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
