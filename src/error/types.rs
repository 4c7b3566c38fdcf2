use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the gridspan crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by the configuration surface.
///
/// Layout input (patterns, spans, tokens) never produces an error; malformed
/// input degrades to absent values instead. These variants cover structural
/// misuse of the configuration only.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("breakpoint scale has no tiers")]
    EmptyScale,
    #[error("unknown breakpoint tier `{0}`")]
    UnknownTier(String),
    #[error("logging failure: {0}")]
    Logging(#[from] LoggingError),
    #[error("configuration parse failure: {0}")]
    Config(#[from] serde_json::Error),
}
