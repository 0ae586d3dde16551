//! Error types shared across Pinchpoint crates.

use std::path::PathBuf;

/// Top-level error type for Pinchpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum PinchpointError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Landmark source error: {message}")]
    Source { message: String },

    #[error("Pointer sink error: {message}")]
    Sink { message: String },

    #[error("Landmark stream error at line {line}: {message}")]
    Stream { line: usize, message: String },

    #[error("Fail-safe triggered: pointer target ({x:.1}, {y:.1}) is inside the corner region")]
    FailsafeTriggered { x: f64, y: f64 },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PinchpointError.
pub type PinchpointResult<T> = Result<T, PinchpointError>;

impl PinchpointError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink {
            message: msg.into(),
        }
    }

    pub fn stream(line: usize, msg: impl Into<String>) -> Self {
        Self::Stream {
            line,
            message: msg.into(),
        }
    }

    /// Whether this error came from the fail-safe guard rather than a fault.
    pub fn is_failsafe(&self) -> bool {
        matches!(self, Self::FailsafeTriggered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_error_names_line() {
        let err = PinchpointError::stream(7, "expected 21 landmarks, got 20");
        assert_eq!(
            err.to_string(),
            "Landmark stream error at line 7: expected 21 landmarks, got 20"
        );
    }

    #[test]
    fn test_failsafe_classification() {
        assert!(PinchpointError::FailsafeTriggered { x: 0.0, y: 0.0 }.is_failsafe());
        assert!(!PinchpointError::config("bad").is_failsafe());
    }
}
