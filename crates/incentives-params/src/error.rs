//! Error types for incentives parameter validation
//!
//! Every validator returns the first violation it finds as a [`ParamsError`].
//! Nothing here is fatal to the host: errors are plain values that the
//! governance caller surfaces as a descriptive string.

use std::fmt;
use thiserror::Error;

/// Main error type for parameter operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// Candidate value's runtime type does not match the field's declared type
    #[error("invalid parameter type: {actual}")]
    InvalidType { actual: String },

    /// Value is zero or negative where a positive value is required
    #[error("{field} must be positive: {value}")]
    NonPositive { field: &'static str, value: String },

    /// Value is above the inclusive upper bound of 100%
    #[error("{field} must <= 100: {value}")]
    AboveMaximum { field: &'static str, value: String },

    /// Decimal value is structurally unset
    #[error("{field} cannot be nil")]
    NilValue { field: &'static str },

    /// Epoch identifier is the empty string
    #[error("epoch identifier cannot be empty")]
    EmptyIdentifier,

    /// Epoch identifier is not known to the registry
    #[error("unknown epoch identifier: {0}")]
    UnknownIdentifier(String),

    /// Key is not part of the registered key table
    #[error("unknown parameter key: {0}")]
    UnknownKey(String),

    /// Raw value could not be decoded into the key's type
    #[error("failed to decode {key}: {reason}")]
    Decode { key: String, reason: String },

    /// Parameter change addressed to another module's subspace
    #[error("parameter change targets subspace '{actual}', expected '{expected}'")]
    Subspace { expected: String, actual: String },

    /// Store has no value under the requested key
    #[error("parameter {0} is not set")]
    NotInitialized(String),

    /// Serialization failure while encoding a value
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Taxonomy of parameter errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong runtime type or undecodable raw value
    TypeMismatch,
    /// Value outside its declared bound
    RangeViolation,
    /// Decimal value is unset
    Absence,
    /// Identifier rejected by the epoch registry
    IdentifierGrammar,
    /// Store or proposal plumbing errors
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "type_mismatch"),
            ErrorKind::RangeViolation => write!(f, "range_violation"),
            ErrorKind::Absence => write!(f, "absence"),
            ErrorKind::IdentifierGrammar => write!(f, "identifier_grammar"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

impl ParamsError {
    /// Create a type mismatch error for the observed type
    pub fn invalid_type(actual: impl Into<String>) -> Self {
        ParamsError::InvalidType {
            actual: actual.into(),
        }
    }

    /// Create a decode error for a key
    pub fn decode(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        ParamsError::Decode {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParamsError::InvalidType { .. } | ParamsError::Decode { .. } => ErrorKind::TypeMismatch,
            ParamsError::NonPositive { .. } | ParamsError::AboveMaximum { .. } => {
                ErrorKind::RangeViolation
            }
            ParamsError::NilValue { .. } => ErrorKind::Absence,
            ParamsError::EmptyIdentifier | ParamsError::UnknownIdentifier(_) => {
                ErrorKind::IdentifierGrammar
            }
            ParamsError::UnknownKey(_)
            | ParamsError::Subspace { .. }
            | ParamsError::NotInitialized(_)
            | ParamsError::Serialization(_) => ErrorKind::Other,
        }
    }

    /// Check if this error rejects a proposed value (vs a store failure)
    pub fn is_validation_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Other)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(err: serde_json::Error) -> Self {
        ParamsError::Serialization(format!("JSON error: {}", err))
    }
}

/// Result type alias for parameter operations
pub type Result<T> = std::result::Result<T, ParamsError>;
