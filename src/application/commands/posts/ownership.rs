// src/application/commands/posts/ownership.rs
use crate::{
    application::{
        dto::Session,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::{Post, specifications::CanModifyPostSpec},
};

pub(super) fn ensure_author(session: &Session, post: &Post, action: &str) -> ApplicationResult<()> {
    if CanModifyPostSpec::new(post, &session.user.id).is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "only the author may {action} this post"
        )))
    }
}
