//! Error types for swarm orchestration

use thiserror::Error;

/// Result type alias for swarm operations
pub type Result<T> = std::result::Result<T, SwarmError>;

/// Errors that surface to callers of the swarm
///
/// Provider failures during research or judging never appear here; they are
/// captured inside `AgentResult` / `VerdictResult` so the caller always
/// receives a complete report.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// Ticker failed validation (must be 1-5 alphanumeric characters)
    #[error("Invalid ticker symbol: {0}")]
    InvalidTicker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
