//! Props validation for Orbit components
//!
//! Components validate their props when they are initialized. Validators are
//! small, single-purpose types that can be combined with [`CompositeValidator`].

use std::fmt::{self, Display};
use std::sync::Arc;

/// Error indicating validation problems with props
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValidationError {
    /// A required property was missing
    MissingRequired(String),
    /// A property had an invalid value
    InvalidValue {
        /// Name of the property
        name: String,
        /// Description of the validation error
        reason: String,
    },
    /// Multiple validation errors
    Multiple(Vec<PropValidationError>),
}

impl PropValidationError {
    /// Shorthand for an [`PropValidationError::InvalidValue`]
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl Display for PropValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValidationError::MissingRequired(name) => {
                write!(f, "Missing required property: {name}")
            }
            PropValidationError::InvalidValue { name, reason } => {
                write!(f, "Invalid value for property {name}: {reason}")
            }
            PropValidationError::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for (i, error) in errors.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PropValidationError {}

/// Trait for props validation
pub trait PropValidator<P> {
    /// Validate the props
    fn validate(&self, props: &P) -> Result<(), PropValidationError>;
}

/// A property validator composed of multiple validators
///
/// Every validator runs; a single failure is returned as-is, several are
/// collected into [`PropValidationError::Multiple`].
pub struct CompositeValidator<P> {
    validators: Vec<Arc<dyn PropValidator<P> + Send + Sync>>,
}

impl<P> CompositeValidator<P> {
    /// Create a new composite validator
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator to the composite
    pub fn add<V>(&mut self, validator: V)
    where
        V: PropValidator<P> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
    }

    /// Builder-style variant of [`CompositeValidator::add`]
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: PropValidator<P> + Send + Sync + 'static,
    {
        self.add(validator);
        self
    }
}

impl<P> PropValidator<P> for CompositeValidator<P> {
    fn validate(&self, props: &P) -> Result<(), PropValidationError> {
        let mut errors = Vec::new();

        for validator in &self.validators {
            if let Err(err) = validator.validate(props) {
                errors.push(err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(PropValidationError::Multiple(errors))
        }
    }
}

impl<P> Default for CompositeValidator<P> {
    fn default() -> Self {
        Self::new()
    }
}
