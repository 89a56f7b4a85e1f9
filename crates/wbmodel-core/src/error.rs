//! Error types for the data model

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using the model's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Data model error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An invariant was violated while constructing an instance
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The converter met a runtime variant it cannot rebuild
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_unsupported_variant(&self) -> bool {
        matches!(self, Error::UnsupportedVariant(_))
    }
}
