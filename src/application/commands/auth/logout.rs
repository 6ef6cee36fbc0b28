// src/application/commands/auth/logout.rs
use super::AuthCommandService;
use crate::application::{ApplicationResult, dto::Session};

impl AuthCommandService {
    pub async fn logout(&self, session: &Session) -> ApplicationResult<()> {
        self.auth.logout(&session.token).await?;
        tracing::info!(user_id = %session.user.id, "logged out");
        Ok(())
    }
}
