use thiserror::Error;

/// Errors produced by the store layer.
///
/// Every operation either succeeds or fails immediately with one of these;
/// a failed operation leaves the store untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A referenced chat, message, user, or notification id is not in the
    /// current state.
    #[error("Record not found")]
    NotFound,

    /// The caller supplied an unusable argument (empty content, blank id,
    /// no chat selected where one is required).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
