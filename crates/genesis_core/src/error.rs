//! Error types for the simulation engine.
//!
//! Degenerate numeric inputs are handled totally by the engine; these variants
//! cover caller bugs and malformed external data only.

use thiserror::Error;

/// Main error type for genesis_core operations.
#[derive(Error, Debug, PartialEq)]
pub enum SimError {
    /// A sensing vector whose length disagrees with the brain's input count.
    #[error("Input length mismatch: expected {expected}, got {actual}")]
    InputLength { expected: usize, actual: usize },

    /// A brain whose weight vectors disagree with its declared counts.
    #[error("Brain shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Configuration rejected at a runtime control.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Genome export or import failed.
    #[error("Genome error: {0}")]
    Genome(String),
}

/// Result type alias for genesis_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    #[must_use]
    pub fn shape<S: Into<String>>(msg: S) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    #[must_use]
    pub fn genome<S: Into<String>>(msg: S) -> Self {
        Self::Genome(msg.into())
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        Self::Genome(e.to_string())
    }
}

impl From<hex::FromHexError> for SimError {
    fn from(e: hex::FromHexError) -> Self {
        Self::Genome(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::InputLength {
            expected: 15,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Input length mismatch: expected 15, got 3"
        );
        assert_eq!(
            SimError::invalid_config("rate").to_string(),
            "Invalid configuration: rate"
        );
    }

    #[test]
    fn test_hex_error_converts_to_genome() {
        let err: SimError = hex::decode("zz").map_err(SimError::from).unwrap_err();
        assert!(matches!(err, SimError::Genome(_)));
    }
}
