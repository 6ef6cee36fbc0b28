use crate::domain::user::User;
use serde::Serialize;
use std::fmt;

/// Opaque session secret issued by the backend on login.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Authenticated request context. Handlers and services receive it
/// explicitly instead of reading shared state.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for SessionUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_owned(),
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
        }
    }
}
