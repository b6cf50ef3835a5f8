//! Error types for the policy crates
//!
//! `PolicyError` covers failures that are not tied to one persistence stage:
//! bad input, configuration problems, and I/O at the edges.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum PolicyError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("application '{0}' not exist")]
    ApplicationNotExist(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}
