// src/application/commands/auth/service.rs
use std::sync::Arc;

use crate::application::{
    ApplicationResult,
    dto::{Session, SessionToken},
    error::ApplicationError,
    ports::backend::{AuthService, BackendErrorKind},
};

pub struct AuthCommandService {
    pub(super) auth: Arc<dyn AuthService>,
}

impl AuthCommandService {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }

    /// Look up the user behind a session cookie. Expired or revoked tokens
    /// resolve to `None` rather than an error.
    pub async fn resolve_session(&self, token: SessionToken) -> ApplicationResult<Option<Session>> {
        if token.is_empty() {
            return Ok(None);
        }
        match self.auth.current_user(&token).await {
            Ok(Some(user)) => Ok(Some(Session { token, user })),
            Ok(None) => Ok(None),
            Err(err) if err.kind == BackendErrorKind::Unauthorized => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub(super) async fn open_session(&self, token: SessionToken) -> ApplicationResult<Session> {
        self.resolve_session(token)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("session was not accepted by the backend"))
    }
}
