// src/domain/user/entity.rs
use crate::domain::user::value_objects::{DisplayName, Email, Password, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: Email,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: DisplayName,
    pub email: Email,
    pub password: Password,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
