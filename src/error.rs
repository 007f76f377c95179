//! Error types for resena operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for resena operations.
///
/// Distinguishes fatal corpus-level failures (malformed input) from
/// per-entity conditions (insufficient data for topic fitting) so callers
/// can skip one bank's topics without aborting the rest of the run.
///
/// # Examples
///
/// ```
/// use resena::error::ResenaError;
///
/// let err = ResenaError::DataInsufficient {
///     reason: "3 documents, need at least 5".to_string(),
/// };
/// assert!(err.to_string().contains("insufficient data"));
/// ```
#[derive(Debug)]
pub enum ResenaError {
    /// An entity's corpus is too small or sparse for topic fitting.
    ///
    /// Callers catch this at the per-entity boundary and continue with
    /// the remaining entities.
    DataInsufficient {
        /// Why the fit was not attempted
        reason: String,
    },

    /// Required field missing or unreadable corpus. Fatal: no stage runs.
    MalformedInput {
        /// Description of the problem, including the expected schema
        message: String,
    },

    /// Matrix dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for ResenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResenaError::DataInsufficient { reason } => {
                write!(f, "insufficient data: {reason}")
            }
            ResenaError::MalformedInput { message } => {
                write!(f, "malformed input: {message}")
            }
            ResenaError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            ResenaError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            ResenaError::Io(e) => write!(f, "I/O error: {e}"),
            ResenaError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            ResenaError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ResenaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResenaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResenaError {
    fn from(err: std::io::Error) -> Self {
        ResenaError::Io(err)
    }
}

impl From<&str> for ResenaError {
    fn from(msg: &str) -> Self {
        ResenaError::Other(msg.to_string())
    }
}

impl From<String> for ResenaError {
    fn from(msg: String) -> Self {
        ResenaError::Other(msg)
    }
}

impl ResenaError {
    /// Create a per-entity data-insufficiency error.
    #[must_use]
    pub fn data_insufficient(reason: impl Into<String>) -> Self {
        Self::DataInsufficient {
            reason: reason.into(),
        }
    }

    /// Create a fatal malformed-input error.
    #[must_use]
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// True when the error is the per-entity skip condition rather than
    /// a corpus-level failure.
    #[must_use]
    pub fn is_data_insufficient(&self) -> bool {
        matches!(self, ResenaError::DataInsufficient { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ResenaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_insufficient_display() {
        let err = ResenaError::data_insufficient("2 documents, need at least 5");
        let msg = err.to_string();
        assert!(msg.contains("insufficient data"));
        assert!(msg.contains("need at least 5"));
        assert!(err.is_data_insufficient());
    }

    #[test]
    fn test_malformed_input_display() {
        let err = ResenaError::malformed_input("missing field `rating`");
        let msg = err.to_string();
        assert!(msg.contains("malformed input"));
        assert!(msg.contains("rating"));
        assert!(!err.is_data_insufficient());
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ResenaError::DimensionMismatch {
            expected: "6 values".to_string(),
            actual: "5 values".to_string(),
        };
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("6 values"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = ResenaError::InvalidHyperparameter {
            param: "n_topics".to_string(),
            value: "0".to_string(),
            constraint: "> 0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid hyperparameter"));
        assert!(msg.contains("n_topics"));
    }

    #[test]
    fn test_from_str_and_string() {
        let err: ResenaError = "boom".into();
        assert!(matches!(err, ResenaError::Other(_)));
        assert_eq!(err.to_string(), "boom");

        let err: ResenaError = "boom".to_string().into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ResenaError = io_err.into();
        assert!(matches!(err, ResenaError::Io(_)));
        use std::error::Error;
        assert!(err.source().is_some());
    }
}
