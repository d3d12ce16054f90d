//! Domain error model.

use thiserror::Error;

/// Result type used at the domain boundary.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The drafting core itself never fails: bad numeric input is coerced and
/// incomplete drafts are reported as validation failures. These variants
/// cover the boundary where untyped input (field names, ids, dates) is
/// turned into typed commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a malformed date).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field name did not match any header, customer or line-item field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
