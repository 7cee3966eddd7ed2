//! # Error Types
//!
//! Every failure is synchronous and goes straight back to the direct
//! caller; nothing here is retried or logged.
//!
//! - [`TypeFailure`] — a strict check found a value of the wrong type.
//! - [`ArityError`] — a shielded function was called with the wrong number
//!   of arguments, or broke its "returns nothing" contract.
//! - [`EnsureError::Precondition`] — a generic precondition failed
//!   (`require_defined`, an invalid shield or record specification, a
//!   missing property in strict `has_property`).

use thiserror::Error;

use crate::descriptor::Descriptor;

/// A strict type check failed.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct TypeFailure {
    expected: Descriptor,
    provided: Option<String>,
    message: String,
}

impl TypeFailure {
    /// Failure with a message derived from the expected and observed types.
    pub fn new(expected: Descriptor, provided: Option<String>) -> Self {
        let message = match &provided {
            Some(observed) => format!("invalid type: {observed}, expected {expected}"),
            None => format!("invalid type, expected {expected}"),
        };
        Self {
            expected,
            provided,
            message,
        }
    }

    /// Failure with a caller-supplied message.
    pub fn with_message(
        expected: Descriptor,
        provided: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            expected,
            provided,
            message: message.into(),
        }
    }

    /// The descriptor that was violated.
    pub fn expected(&self) -> &Descriptor {
        &self.expected
    }

    /// Name of the type that was actually provided, when known.
    pub fn provided(&self) -> Option<&str> {
        self.provided.as_deref()
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A shielded call broke its argument-count or return contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArityError {
    /// Argument count outside `[min, max]`.
    #[error("invalid argument count: expected {min}..={max}, got {actual}")]
    ArgumentCount {
        /// Minimum accepted argument count.
        min: usize,
        /// Maximum accepted argument count.
        max: usize,
        /// Number of arguments supplied.
        actual: usize,
    },

    /// The function returned a value although its return type is `Nothing`.
    #[error("function returned a value when nothing was expected (got {actual})")]
    UnexpectedReturn {
        /// Observed type of the returned value.
        actual: String,
    },
}

/// Top-level error type for type assertions.
#[derive(Error, Debug, Clone)]
pub enum EnsureError {
    /// Strict type check failed.
    #[error("type failure: {0}")]
    Type(#[from] TypeFailure),

    /// Shielded call violated its arity or return contract.
    #[error("arity error: {0}")]
    Arity(#[from] ArityError),

    /// Generic precondition failure.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl EnsureError {
    /// Shorthand for a precondition failure.
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition(reason.into())
    }

    /// The type failure, if this is one.
    pub fn as_type_failure(&self) -> Option<&TypeFailure> {
        match self {
            Self::Type(failure) => Some(failure),
            _ => None,
        }
    }

    /// True for [`EnsureError::Arity`].
    pub fn is_arity(&self) -> bool {
        matches!(self, Self::Arity(_))
    }

    /// True for [`EnsureError::Precondition`].
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

/// Result type for type assertions.
pub type EnsureResult<T> = Result<T, EnsureError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Primitive;

    #[test]
    fn type_failure_message_names_both_types() {
        let failure = TypeFailure::new(Descriptor::from(Primitive::String), Some("array".into()));
        assert_eq!(failure.message(), "invalid type: array, expected String");
        assert_eq!(failure.provided(), Some("array"));
        assert!(matches!(
            failure.expected(),
            Descriptor::Primitive(Primitive::String)
        ));
    }

    #[test]
    fn type_failure_without_observed_type() {
        let failure = TypeFailure::new(Descriptor::Absent, None);
        assert_eq!(failure.to_string(), "invalid type, expected Nothing");
    }

    #[test]
    fn type_failure_with_custom_message() {
        let failure = TypeFailure::with_message(
            Descriptor::NUMBER,
            Some("string".into()),
            "Person.age: invalid type: string, expected Number",
        );
        assert_eq!(failure.to_string(), "Person.age: invalid type: string, expected Number");
        assert_eq!(failure.expected(), &Descriptor::NUMBER);
        assert_eq!(failure.provided(), Some("string"));
    }

    #[test]
    fn arity_error_display() {
        let err = ArityError::ArgumentCount {
            min: 0,
            max: 1,
            actual: 2,
        };
        let text = err.to_string();
        assert!(text.contains("0..=1"));
        assert!(text.contains("got 2"));
    }

    #[test]
    fn ensure_error_classification() {
        let err = EnsureError::from(ArityError::UnexpectedReturn {
            actual: "boolean".into(),
        });
        assert!(err.is_arity());
        assert!(!err.is_precondition());
        assert!(err.as_type_failure().is_none());

        let err = EnsureError::precondition("expected a defined variable");
        assert!(err.is_precondition());
        assert!(err.to_string().contains("expected a defined variable"));
    }
}
