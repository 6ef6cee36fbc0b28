// src/application/commands/posts/submit.rs
use super::{PostCommandService, ownership::ensure_author};
use crate::{
    application::{
        dto::{Navigation, Session},
        error::{ApplicationError, ApplicationResult},
        forms::{FieldErrors, FieldName, PostDraft, post_form::IMAGE_REQUIRED},
    },
    domain::post::{NewPost, Post, PostUpdate},
};

pub struct SubmitPostCommand {
    pub draft: PostDraft,
    /// The post being edited; `None` creates a new one.
    pub editing: Option<Post>,
}

impl PostCommandService {
    /// Run the submit sequence: upload the featured image, then create or
    /// update the record. Calls are strictly sequential and never retried.
    /// Failures are logged here and returned to the caller.
    pub async fn submit(
        &self,
        session: &Session,
        command: SubmitPostCommand,
    ) -> ApplicationResult<Navigation> {
        let SubmitPostCommand { draft, editing } = command;
        let result = match editing {
            Some(post) => self.update_existing(session, post, draft).await,
            None => self.create_new(session, draft).await,
        };

        if let Err(err) = &result {
            tracing::error!(
                error = %err,
                user_id = %session.user.id,
                "post submission failed"
            );
        }
        result
    }

    async fn create_new(&self, session: &Session, draft: PostDraft) -> ApplicationResult<Navigation> {
        let PostDraft {
            title,
            slug,
            content,
            status,
            image,
        } = draft;

        let image = image.ok_or_else(|| {
            let mut errors = FieldErrors::default();
            errors.insert(FieldName::Image, IMAGE_REQUIRED);
            ApplicationError::InvalidForm(errors)
        })?;

        let file = self.files.upload_file(image).await?;
        let new_post = NewPost {
            title,
            slug,
            content,
            status,
            featured_image: file.id.clone(),
            user_id: session.user.id.clone(),
        };

        let created = match self.posts.create_post(new_post).await {
            Ok(created) => created,
            Err(err) => {
                tracing::warn!(file_id = %file.id, "record write failed; uploaded asset left in storage");
                return Err(err.into());
            }
        };

        tracing::info!(post_id = %created.id, "post created");
        Ok(Navigation::Post(created.id))
    }

    async fn update_existing(
        &self,
        session: &Session,
        post: Post,
        draft: PostDraft,
    ) -> ApplicationResult<Navigation> {
        ensure_author(session, &post, "edit")?;

        let PostDraft {
            title,
            slug,
            content,
            status,
            image,
        } = draft;

        let uploaded = match image {
            Some(image) => Some(self.files.upload_file(image).await?),
            None => None,
        };

        let mut update = PostUpdate {
            title,
            slug,
            content,
            status,
            featured_image: None,
        };
        if let Some(file) = &uploaded {
            update = update.with_featured_image(file.id.clone());
        }

        let updated = match self.posts.update_post(&post.id, update).await {
            Ok(updated) => updated,
            Err(err) => {
                if let Some(file) = &uploaded {
                    tracing::warn!(file_id = %file.id, "record write failed; uploaded asset left in storage");
                }
                return Err(err.into());
            }
        };

        // The old asset is only released once the record points at the new one.
        if uploaded.is_some() {
            if let Err(err) = self.files.delete_file(&post.featured_image).await {
                tracing::warn!(
                    error = %err,
                    file_id = %post.featured_image,
                    "could not delete replaced featured image"
                );
            }
        }

        tracing::info!(post_id = %updated.id, "post updated");
        Ok(Navigation::Post(updated.id))
    }
}
