//! Error types for offset extraction and trajectory reconstruction.

use thiserror::Error;

/// Main error type for the dispensing pipeline.
///
/// Only [`DoseError::MissingReferencePosition`] can come out of the parsing
/// pipeline itself. Unresolvable offsets and unknown references are reported
/// through a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) and skipped.
#[derive(Debug, Error)]
pub enum DoseError {
    #[error("Reference position {name} not found in data file")]
    MissingReferencePosition { name: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl DoseError {
    /// Whether the error stops the pipeline because the reference frame is incomplete.
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, DoseError::MissingReferencePosition { .. })
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DoseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_message_names_identifier() {
        let err = DoseError::MissingReferencePosition {
            name: "Xdose_B_2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Reference position Xdose_B_2 not found in data file"
        );
        assert!(err.is_missing_reference());
    }

    #[test]
    fn test_invalid_config_is_not_missing_reference() {
        let err = DoseError::InvalidConfig {
            message: "src_path is empty".to_string(),
        };
        assert!(!err.is_missing_reference());
        assert_eq!(err.to_string(), "Invalid configuration: src_path is empty");
    }
}
