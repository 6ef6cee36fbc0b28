// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Message without the variant prefix, suitable for inline field errors.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg,
        }
    }
}
