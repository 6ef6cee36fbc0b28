//! The session secret travels in an HTTP-only cookie.

use crate::application::dto::SessionToken;
use axum::http::{HeaderMap, HeaderValue};
use headers::{Cookie, HeaderMapExt};

use super::error::{HttpError, HttpResult};

#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self, headers: &HeaderMap) -> Option<SessionToken> {
        headers
            .typed_get::<Cookie>()
            .and_then(|cookie| cookie.get(&self.name).map(SessionToken::new))
            .filter(|token| !token.is_empty())
    }

    pub fn issue(&self, token: &SessionToken) -> HttpResult<HeaderValue> {
        self.header(&format!("{}={}", self.name, token.as_str()))
    }

    pub fn clear(&self) -> HttpResult<HeaderValue> {
        self.header(&format!("{}=; Max-Age=0", self.name))
    }

    fn header(&self, pair: &str) -> HttpResult<HeaderValue> {
        let mut value = format!("{pair}; Path=/; HttpOnly; SameSite=Lax");
        if self.secure {
            value.push_str("; Secure");
        }
        HeaderValue::from_str(&value)
            .map_err(|_| HttpError::bad_request("session token is not a valid cookie value"))
    }
}
