// src/application/commands/posts/delete.rs
use super::{PostCommandService, ownership::ensure_author};
use crate::{
    application::{
        dto::{Navigation, Session},
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::PostId,
};

pub struct DeletePostCommand {
    pub id: String,
}

impl PostCommandService {
    /// Delete the record first, then its featured image.
    pub async fn delete_post(
        &self,
        session: &Session,
        command: DeletePostCommand,
    ) -> ApplicationResult<Navigation> {
        let id = PostId::new(command.id)?;
        let post = self
            .posts
            .get_post(&id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        ensure_author(session, &post, "delete")?;

        self.posts.delete_post(&id).await?;
        if let Err(err) = self.files.delete_file(&post.featured_image).await {
            tracing::warn!(
                error = %err,
                file_id = %post.featured_image,
                "post deleted but its featured image could not be removed"
            );
        }

        tracing::info!(post_id = %id, "post deleted");
        Ok(Navigation::Home)
    }
}
