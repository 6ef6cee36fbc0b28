// src/application/commands/auth/signup.rs
use super::AuthCommandService;
use crate::{
    application::{ApplicationResult, dto::Session},
    domain::user::{Credentials, DisplayName, Email, NewAccount, Password},
};

pub struct SignUpCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AuthCommandService {
    /// Create the account, then log straight into it.
    pub async fn sign_up(&self, command: SignUpCommand) -> ApplicationResult<Session> {
        let account = NewAccount {
            name: DisplayName::new(command.name)?,
            email: Email::new(command.email)?,
            password: Password::new(command.password)?,
        };
        let credentials = Credentials {
            email: account.email.clone(),
            password: account.password.expose().to_owned(),
        };

        let user = self.auth.create_account(account).await?;
        tracing::info!(user_id = %user.id, "account created");

        let token = self.auth.login(credentials).await?;
        self.open_session(token).await
    }
}
