//! Domain errors for the scriptforge workflow.

use thiserror::Error;

/// Errors that can occur while preparing or executing a script run.
///
/// `ProfileNotFound` and `ProfileInvalid` are configuration errors raised
/// before the state machine starts. The remaining variants are raised inside
/// a step and end the run without a final script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Brand profile not found for channel '{channel}' (expected {path})")]
    ProfileNotFound { channel: String, path: String },

    #[error("Brand profile for channel '{channel}' is invalid: {reason}")]
    ProfileInvalid { channel: String, reason: String },

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl WorkflowError {
    /// Returns true for errors detected before the run begins.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound { .. } | Self::ProfileInvalid { .. }
        )
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors() {
        let not_found = WorkflowError::ProfileNotFound {
            channel: "fireship".to_string(),
            path: "config/fireship_brand_voice.json".to_string(),
        };
        let invalid = WorkflowError::ProfileInvalid {
            channel: "fireship".to_string(),
            reason: "missing required fields: [\"tone\"]".to_string(),
        };

        assert!(not_found.is_configuration());
        assert!(invalid.is_configuration());
        assert!(!WorkflowError::MissingInput("draft".to_string()).is_configuration());
        assert!(!WorkflowError::Scoring("bad".to_string()).is_configuration());
        assert!(!WorkflowError::Provider("down".to_string()).is_configuration());
    }

    #[test]
    fn test_error_messages() {
        let err = WorkflowError::ProfileNotFound {
            channel: "veritasium".to_string(),
            path: "config/veritasium_brand_voice.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Brand profile not found for channel 'veritasium' (expected config/veritasium_brand_voice.json)"
        );
        assert_eq!(
            WorkflowError::Provider("timeout".to_string()).to_string(),
            "Provider error: timeout"
        );
    }
}
