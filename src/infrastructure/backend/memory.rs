//! Process-local backend used for development and tests.
//!
//! Implements every backend port against mutex-guarded maps. Nothing is
//! persisted; ids are random UUIDs.

use crate::application::{
    dto::SessionToken,
    ports::{
        backend::{
            AuthService, BackendError, BackendResult, FileStorage, FileUpload, PostStore,
            StoredFile,
        },
        time::Clock,
    },
};
use crate::domain::{
    post::{FileId, NewPost, Post, PostFilter, PostId, PostUpdate},
    user::{Credentials, DisplayName, Email, NewAccount, User, UserId},
};
use crate::infrastructure::{security::password::Argon2PasswordHasher, time::SystemClock};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

struct Account {
    user: User,
    /// `None` for seeded accounts that can only be used through a seeded session.
    password_hash: Option<String>,
}

struct StoredBlob {
    meta: StoredFile,
    bytes: Bytes,
}

pub struct InMemoryBackend {
    clock: Arc<dyn Clock>,
    hasher: Argon2PasswordHasher,
    posts: Mutex<Vec<Post>>,
    files: Mutex<HashMap<String, StoredBlob>>,
    accounts: Mutex<HashMap<String, Account>>,
    sessions: Mutex<HashMap<String, UserId>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn corrupt(err: &crate::domain::errors::DomainError) -> BackendError {
    BackendError::invalid_response(err.to_string())
}

impl InMemoryBackend {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            hasher: Argon2PasswordHasher,
            posts: Mutex::new(Vec::new()),
            files: Mutex::new(HashMap::new()),
            accounts: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Register a password-less account and open a session for it.
    pub fn seed_session(&self, name: &str, email: &str) -> BackendResult<(User, SessionToken)> {
        let user = User {
            id: UserId::new(new_id()).map_err(|err| corrupt(&err))?,
            name: DisplayName::new(name).map_err(|err| BackendError::rejected(err.message()))?,
            email: Email::new(email).map_err(|err| BackendError::rejected(err.message()))?,
        };
        let token = self.start_session(&user);
        lock(&self.accounts).insert(
            user.email.as_str().to_owned(),
            Account {
                user: user.clone(),
                password_hash: None,
            },
        );
        Ok((user, token))
    }

    pub fn post_count(&self) -> usize {
        lock(&self.posts).len()
    }

    pub fn file_count(&self) -> usize {
        lock(&self.files).len()
    }

    pub fn has_file(&self, id: &FileId) -> bool {
        lock(&self.files).contains_key(id.as_str())
    }

    /// Metadata and contents of a stored file.
    pub fn stored_file(&self, id: &FileId) -> Option<(StoredFile, Bytes)> {
        lock(&self.files)
            .get(id.as_str())
            .map(|blob| (blob.meta.clone(), blob.bytes.clone()))
    }

    fn start_session(&self, user: &User) -> SessionToken {
        let token = format!("{}{}", new_id(), new_id());
        lock(&self.sessions).insert(token.clone(), user.id.clone());
        SessionToken::new(token)
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl FileStorage for InMemoryBackend {
    async fn upload_file(&self, file: FileUpload) -> BackendResult<StoredFile> {
        if file.is_empty() {
            return Err(BackendError::rejected("file is empty"));
        }
        let id = FileId::new(new_id()).map_err(|err| corrupt(&err))?;
        let meta = StoredFile {
            id: id.clone(),
            name: file.file_name,
            mime_type: file.content_type,
            size: file.bytes.len() as u64,
        };
        lock(&self.files).insert(
            id.as_str().to_owned(),
            StoredBlob {
                meta: meta.clone(),
                bytes: file.bytes,
            },
        );
        Ok(meta)
    }

    async fn delete_file(&self, id: &FileId) -> BackendResult<()> {
        lock(&self.files)
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| BackendError::not_found(format!("file {id} not found")))
    }

    fn file_preview_url(&self, id: &FileId) -> String {
        format!("memory://files/{id}/preview")
    }
}

#[async_trait]
impl PostStore for InMemoryBackend {
    async fn create_post(&self, post: NewPost) -> BackendResult<Post> {
        let now = self.clock.now();
        let created = Post {
            id: PostId::new(new_id()).map_err(|err| corrupt(&err))?,
            title: post.title,
            slug: post.slug,
            content: post.content,
            status: post.status,
            featured_image: post.featured_image,
            user_id: post.user_id,
            created_at: now,
            updated_at: now,
        };
        lock(&self.posts).push(created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: &PostId, update: PostUpdate) -> BackendResult<Post> {
        let now = self.clock.now();
        let mut posts = lock(&self.posts);
        let post = posts
            .iter_mut()
            .find(|post| &post.id == id)
            .ok_or_else(|| BackendError::not_found(format!("post {id} not found")))?;
        update.apply_to(post, now);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: &PostId) -> BackendResult<()> {
        let mut posts = lock(&self.posts);
        let before = posts.len();
        posts.retain(|post| &post.id != id);
        if posts.len() == before {
            return Err(BackendError::not_found(format!("post {id} not found")));
        }
        Ok(())
    }

    async fn get_post(&self, id: &PostId) -> BackendResult<Option<Post>> {
        Ok(lock(&self.posts).iter().find(|post| &post.id == id).cloned())
    }

    async fn list_posts(&self, filter: PostFilter) -> BackendResult<Vec<Post>> {
        Ok(lock(&self.posts)
            .iter()
            .rev()
            .filter(|post| filter.accepts(post))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuthService for InMemoryBackend {
    async fn create_account(&self, account: NewAccount) -> BackendResult<User> {
        if lock(&self.accounts).contains_key(account.email.as_str()) {
            return Err(BackendError::conflict(
                "A user with the same email already exists",
            ));
        }

        let password_hash = self.hasher.hash(account.password.expose()).await?;
        let user = User {
            id: UserId::new(new_id()).map_err(|err| corrupt(&err))?,
            name: account.name,
            email: account.email,
        };

        let mut accounts = lock(&self.accounts);
        if accounts.contains_key(user.email.as_str()) {
            return Err(BackendError::conflict(
                "A user with the same email already exists",
            ));
        }
        accounts.insert(
            user.email.as_str().to_owned(),
            Account {
                user: user.clone(),
                password_hash: Some(password_hash),
            },
        );
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> BackendResult<SessionToken> {
        let (user, password_hash) = {
            let accounts = lock(&self.accounts);
            let account = accounts
                .get(credentials.email.as_str())
                .ok_or_else(|| BackendError::unauthorized("Invalid credentials"))?;
            (account.user.clone(), account.password_hash.clone())
        };
        let password_hash =
            password_hash.ok_or_else(|| BackendError::unauthorized("Invalid credentials"))?;

        self.hasher
            .verify(&credentials.password, &password_hash)
            .await?;
        Ok(self.start_session(&user))
    }

    async fn current_user(&self, token: &SessionToken) -> BackendResult<Option<User>> {
        let Some(user_id) = lock(&self.sessions).get(token.as_str()).cloned() else {
            return Ok(None);
        };
        Ok(lock(&self.accounts)
            .values()
            .find(|account| account.user.id == user_id)
            .map(|account| account.user.clone()))
    }

    async fn logout(&self, token: &SessionToken) -> BackendResult<()> {
        lock(&self.sessions)
            .remove(token.as_str())
            .map(|_| ())
            .ok_or_else(|| BackendError::unauthorized("session not found"))
    }
}
