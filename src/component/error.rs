//! Error types for component operations

use std::any::TypeId;
use std::error::Error;
use std::fmt;

use crate::component::props::PropValidationError;

/// Errors that can occur during component operations
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Props failed the component's validation
    InvalidProps(PropValidationError),

    /// Props type mismatch
    PropsMismatch { expected: TypeId, got: TypeId },

    /// Error acquiring lock
    LockError(String),

    /// Error rendering component
    RenderError(String),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProps(err) => write!(f, "Invalid props: {err}"),
            Self::PropsMismatch { expected, got } => write!(
                f,
                "Props type mismatch - expected {:?}, got {:?}",
                expected, got
            ),
            Self::LockError(msg) => write!(f, "Lock error: {msg}"),
            Self::RenderError(msg) => write!(f, "Error rendering component: {msg}"),
        }
    }
}

impl Error for ComponentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidProps(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PropValidationError> for ComponentError {
    fn from(error: PropValidationError) -> Self {
        ComponentError::InvalidProps(error)
    }
}
