//! Common error types for catalog-admin.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the storage backends behind the token store.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a JSON object of strings.
    #[error("corrupt storage file: {0}")]
    Corrupt(#[from] serde_json::Error),
}
