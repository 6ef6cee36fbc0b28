// src/application/commands/auth/mod.rs
mod login;
mod logout;
mod service;
mod signup;

pub use login::LoginCommand;
pub use service::AuthCommandService;
pub use signup::SignUpCommand;
