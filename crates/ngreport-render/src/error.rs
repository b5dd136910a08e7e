//! Error types for ngreport-render

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort report generation for one output format
#[derive(Debug, Error)]
pub enum Error {
    /// IO error (from std::io)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Aggregation error from the results crate
    #[error("result aggregation failed: {0}")]
    Results(#[from] ngreport_results::Error),

    /// Unrecognised XML dialect name
    #[error("unknown XML dialect: {0} (expected \"testng\" or \"junit\")")]
    UnknownDialect(String),
}
