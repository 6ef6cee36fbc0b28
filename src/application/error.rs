// src/application/error.rs
use crate::application::forms::FieldErrors;
use crate::application::ports::backend::{BackendError, BackendErrorKind};
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("form has {} invalid field(s)", .0.len())]
    InvalidForm(FieldErrors),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}

impl From<BackendError> for ApplicationError {
    fn from(err: BackendError) -> Self {
        match err.kind {
            BackendErrorKind::NotFound => Self::NotFound(err.message),
            BackendErrorKind::Unauthorized => Self::Unauthorized(err.message),
            BackendErrorKind::Conflict => Self::Conflict(err.message),
            BackendErrorKind::Rejected => Self::Validation(err.message),
            BackendErrorKind::Unavailable => Self::Unavailable(err.message),
            BackendErrorKind::InvalidResponse => Self::Infrastructure(err.message),
        }
    }
}
