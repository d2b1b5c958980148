//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// invariants, conflicts). I/O concerns (snapshot files, the document
/// store) are handled with `anyhow` at those edges.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input, rejected field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. checking out an empty cart).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A requested record was not found (product, cart line, account).
    #[error("not found")]
    NotFound,

    /// A conflict with existing state (e.g. email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The operation requires a signed-in session or correct credentials.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
