//! Document processing errors.
use thiserror::Error;

/// An error relating to processing a specification document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Wrapped error for an HTML rewriting error.
    #[error("A wrapped variant for an HTML rewriting error: {0}")]
    Rewriting(lol_html::errors::RewritingError),
    /// Rewritten output is not UTF-8.
    #[error("Rewritten document is not UTF-8: {0}")]
    Utf8(std::string::FromUtf8Error),
}

impl From<lol_html::errors::RewritingError> for DocumentError {
    fn from(err: lol_html::errors::RewritingError) -> Self {
        DocumentError::Rewriting(err)
    }
}

impl From<std::string::FromUtf8Error> for DocumentError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DocumentError::Utf8(err)
    }
}
