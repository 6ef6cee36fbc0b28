// src/domain/user/mod.rs
pub mod entity;
pub mod value_objects;

pub use entity::{Credentials, NewAccount, User};
pub use value_objects::{DisplayName, Email, Password, UserId};
