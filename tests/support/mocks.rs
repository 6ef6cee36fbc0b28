// tests/support/mocks.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use postdesk::application::dto::SessionToken;
use postdesk::application::ports::backend::{
    AuthService, BackendError, BackendResult, FileStorage, FileUpload, PostStore, StoredFile,
};
use postdesk::domain::user::{Credentials, NewAccount, User};
use postdesk::application::ports::time::Clock;
use postdesk::domain::post::{FileId, NewPost, Post, PostFilter, PostId, PostUpdate};
use postdesk::infrastructure::backend::InMemoryBackend;

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// File storage that records every call before delegating.
pub struct RecordingFiles {
    inner: Arc<InMemoryBackend>,
    pub uploads: AtomicUsize,
    pub deleted: Mutex<Vec<FileId>>,
}

impl RecordingFiles {
    pub fn new(inner: Arc<InMemoryBackend>) -> Self {
        Self {
            inner,
            uploads: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn deleted_ids(&self) -> Vec<FileId> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for RecordingFiles {
    async fn upload_file(&self, file: FileUpload) -> BackendResult<StoredFile> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.inner.upload_file(file).await
    }

    async fn delete_file(&self, id: &FileId) -> BackendResult<()> {
        self.deleted.lock().unwrap().push(id.clone());
        self.inner.delete_file(id).await
    }

    fn file_preview_url(&self, id: &FileId) -> String {
        self.inner.file_preview_url(id)
    }
}

/// Post store whose writes fail with a fixed error; reads are served by the
/// wrapped backend.
pub struct FailingWrites {
    inner: Arc<InMemoryBackend>,
    error: BackendError,
}

impl FailingWrites {
    pub fn new(inner: Arc<InMemoryBackend>, error: BackendError) -> Self {
        Self { inner, error }
    }
}

#[async_trait]
impl PostStore for FailingWrites {
    async fn create_post(&self, _post: NewPost) -> BackendResult<Post> {
        Err(self.error.clone())
    }

    async fn update_post(&self, _id: &PostId, _update: PostUpdate) -> BackendResult<Post> {
        Err(self.error.clone())
    }

    async fn delete_post(&self, _id: &PostId) -> BackendResult<()> {
        Err(self.error.clone())
    }

    async fn get_post(&self, id: &PostId) -> BackendResult<Option<Post>> {
        self.inner.get_post(id).await
    }

    async fn list_posts(&self, filter: PostFilter) -> BackendResult<Vec<Post>> {
        self.inner.list_posts(filter).await
    }
}

/// Account service that cannot be reached.
pub struct UnreachableAuth;

#[async_trait]
impl AuthService for UnreachableAuth {
    async fn create_account(&self, _account: NewAccount) -> BackendResult<User> {
        Err(BackendError::unavailable("auth backend down"))
    }

    async fn login(&self, _credentials: Credentials) -> BackendResult<SessionToken> {
        Err(BackendError::unavailable("auth backend down"))
    }

    async fn current_user(&self, _token: &SessionToken) -> BackendResult<Option<User>> {
        Err(BackendError::unavailable("auth backend down"))
    }

    async fn logout(&self, _token: &SessionToken) -> BackendResult<()> {
        Err(BackendError::unavailable("auth backend down"))
    }
}
