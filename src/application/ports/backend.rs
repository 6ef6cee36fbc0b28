// src/application/ports/backend.rs
//! Ports onto the backend-as-a-service: record storage, file storage and
//! account sessions. Implementations live in `infrastructure::backend`.

use crate::application::dto::SessionToken;
use crate::domain::{
    post::{FileId, NewPost, Post, PostFilter, PostId, PostUpdate},
    user::{Credentials, NewAccount, User},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use thiserror::Error;

pub type BackendResult<T> = Result<T, BackendError>;

/// How a backend call failed. `Unavailable` is the only transient kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    NotFound,
    Unauthorized,
    Conflict,
    Rejected,
    Unavailable,
    InvalidResponse,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not found",
            Self::Unauthorized => "unauthorized",
            Self::Conflict => "conflict",
            Self::Rejected => "rejected",
            Self::Unavailable => "unavailable",
            Self::InvalidResponse => "invalid response",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Error)]
#[error("backend {kind}: {message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unauthorized, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Conflict, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Rejected, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unavailable, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::InvalidResponse, message)
    }

    pub fn is_transient(&self) -> bool {
        self.kind == BackendErrorKind::Unavailable
    }
}

/// Raw file taken from the form's file input.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub const ACCEPTED_TYPES: [&'static str; 4] =
        ["image/png", "image/jpg", "image/jpeg", "image/gif"];

    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_accepted_image(&self) -> bool {
        Self::ACCEPTED_TYPES.contains(&self.content_type.as_str())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: FileId,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload_file(&self, file: FileUpload) -> BackendResult<StoredFile>;
    async fn delete_file(&self, id: &FileId) -> BackendResult<()>;
    fn file_preview_url(&self, id: &FileId) -> String;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, post: NewPost) -> BackendResult<Post>;
    async fn update_post(&self, id: &PostId, update: PostUpdate) -> BackendResult<Post>;
    async fn delete_post(&self, id: &PostId) -> BackendResult<()>;
    async fn get_post(&self, id: &PostId) -> BackendResult<Option<Post>>;
    async fn list_posts(&self, filter: PostFilter) -> BackendResult<Vec<Post>>;
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> BackendResult<User>;
    async fn login(&self, credentials: Credentials) -> BackendResult<SessionToken>;
    /// `Ok(None)` when the token no longer names a live session.
    async fn current_user(&self, token: &SessionToken) -> BackendResult<Option<User>>;
    async fn logout(&self, token: &SessionToken) -> BackendResult<()>;
}
