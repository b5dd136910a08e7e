//! Error types for ngreport-results

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting or aggregating test results
#[derive(Debug, Error)]
pub enum Error {
    /// An execution arrived without a thread identifier
    #[error("execution {class}.{method} is missing a thread identifier")]
    MissingThreadId {
        /// Declaring class of the offending execution
        class: String,
        /// Method name of the offending execution
        method: String,
    },

    /// An execution's end timestamp precedes its start timestamp
    #[error("execution {class}.{method} ends before it starts ({start}ms..{end}ms)")]
    EndsBeforeStart {
        /// Declaring class of the offending execution
        class: String,
        /// Method name of the offending execution
        method: String,
        /// Recorded start, epoch milliseconds
        start: i64,
        /// Recorded end, epoch milliseconds
        end: i64,
    },

    /// IO error (from std::io)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_thread_id_display() {
        let err = Error::MissingThreadId {
            class: "com.example.LoginTest".to_string(),
            method: "testLogin".to_string(),
        };
        assert!(err.to_string().contains("com.example.LoginTest"));
        assert!(err.to_string().contains("testLogin"));
    }

    #[test]
    fn test_ends_before_start_display() {
        let err = Error::EndsBeforeStart {
            class: "C".to_string(),
            method: "m".to_string(),
            start: 200,
            end: 100,
        };
        assert!(err.to_string().contains("200ms"));
        assert!(err.to_string().contains("100ms"));
    }
}
