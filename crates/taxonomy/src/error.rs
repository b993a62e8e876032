//! Contract-level validation errors.

use thiserror::Error;

/// A payload that deserialised fine but breaks a business rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name field is empty or whitespace only.
    #[error("field '{0}' must not be blank")]
    Blank(&'static str),

    /// An explicit `null` was sent for a column that cannot be null.
    #[error("field '{0}' cannot be null")]
    NullNotAllowed(&'static str),
}
