//! Error types for the public-information base.
//!
//! All errors are strongly typed and returned to the caller; nothing in
//! this crate panics or signals failure by truncating data.

/// Store and codec error kinds.
#[derive(Debug, thiserror::Error)]
pub enum PibError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("No default set: {0}")]
    NoDefault(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PibError>;
