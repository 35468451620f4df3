//! Runtime error types shared by every component.
//!
//! All fallible operations in the evaluation core surface failures as a
//! [`RubyError`] carrying one of the kinds below. Errors propagate to the
//! immediate caller; nothing in the core substitutes defaults or retries.

use thiserror::Error;

/// The kind of runtime error.
///
/// These correspond to the exception classes a Ruby-compatible runtime
/// raises from its evaluation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value lacks a required capability or has the wrong type
    TypeMismatch,
    /// Division by zero on an exact numeric kind (Integer, Rational)
    DivisionByZero,
    /// Method resolution failed for a receiver type
    MethodMissing,
    /// An enumerator was advanced past completion
    StopIteration,
    /// A deadline expired before the guarded work completed
    Timeout,
    /// A mutation was attempted on a frozen value
    FrozenMutation,
}

impl ErrorKind {
    /// Exception class name as user code would see it.
    pub fn class_name(self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "TypeError",
            ErrorKind::DivisionByZero => "ZeroDivisionError",
            ErrorKind::MethodMissing => "NoMethodError",
            ErrorKind::StopIteration => "StopIteration",
            ErrorKind::Timeout => "Timeout::Error",
            ErrorKind::FrozenMutation => "FrozenError",
        }
    }
}

/// A runtime error with kind and message.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, RubyError};
///
/// let err = RubyError::type_mismatch("no implicit conversion of nil into String");
/// assert_eq!(err.kind, ErrorKind::TypeMismatch);
/// assert!(err.to_string().starts_with("TypeError"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", kind.class_name())]
pub struct RubyError {
    /// The error classification
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
}

/// Result alias used throughout the runtime core.
pub type RubyResult<T> = Result<T, RubyError>;

impl RubyError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        RubyError {
            kind,
            message: message.into(),
        }
    }

    /// A `TypeError`-class error.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, message)
    }

    /// A `ZeroDivisionError`.
    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "divided by 0")
    }

    /// A `NoMethodError` for `method` on a receiver of type `type_name`.
    pub fn method_missing(type_name: &str, method: &str) -> Self {
        Self::new(
            ErrorKind::MethodMissing,
            format!("undefined method `{}' for {}", method, type_name),
        )
    }

    /// A `StopIteration` signal.
    pub fn stop_iteration() -> Self {
        Self::new(ErrorKind::StopIteration, "iteration reached an end")
    }

    /// A `Timeout::Error` for an expired deadline.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// A `FrozenError` for a rejected mutation.
    pub fn frozen_mutation(type_name: &str) -> Self {
        Self::new(
            ErrorKind::FrozenMutation,
            format!("can't modify frozen {}", type_name),
        )
    }
}
