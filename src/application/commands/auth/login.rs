// src/application/commands/auth/login.rs
use super::AuthCommandService;
use crate::{
    application::{ApplicationResult, dto::Session, error::ApplicationError},
    domain::user::{Credentials, Email},
};

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl AuthCommandService {
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<Session> {
        if command.password.is_empty() {
            return Err(ApplicationError::validation("Password is required"));
        }
        let credentials = Credentials {
            email: Email::new(command.email)?,
            password: command.password,
        };

        let token = self.auth.login(credentials).await?;
        let session = self.open_session(token).await?;
        tracing::info!(user_id = %session.user.id, "logged in");
        Ok(session)
    }
}
