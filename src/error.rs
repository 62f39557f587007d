//! Invocation error definitions.

use thiserror::Error;

/// Boxed error returned by delegate handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort an invocation.
///
/// No reply is produced when either occurs. Both variants forward `Display`
/// and `source` to the underlying cause unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// The event could not be turned into a valid request URL.
    #[error(transparent)]
    Translate(#[from] axum::http::Error),

    /// The delegate handler failed.
    #[error(transparent)]
    Handler(BoxError),
}

/// Result type for invocation operations.
pub type Result<T> = std::result::Result<T, Error>;
