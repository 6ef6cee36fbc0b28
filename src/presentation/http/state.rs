// src/presentation/http/state.rs
use crate::application::{dto::Session, forms::SlugSyncPolicy, services::ApplicationServices};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    session_cookie::SessionCookie,
};
use axum::http::HeaderMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub session_cookie: SessionCookie,
    pub slug_policy: SlugSyncPolicy,
}

impl HttpState {
    /// Session named by the request's cookie, if it is still live.
    pub async fn resolve_session(&self, headers: &HeaderMap) -> HttpResult<Option<Session>> {
        let Some(token) = self.session_cookie.read(headers) else {
            return Ok(None);
        };
        self.services
            .auth_commands
            .resolve_session(token)
            .await
            .into_http()
    }
}
