// src/application/commands/posts/mod.rs
mod delete;
mod ownership;
mod service;
mod submit;

pub use delete::DeletePostCommand;
pub use service::PostCommandService;
pub use submit::SubmitPostCommand;
