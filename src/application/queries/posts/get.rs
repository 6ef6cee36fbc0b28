use super::PostQueryService;
use crate::{
    application::{
        dto::{PostDetailDto, Session},
        error::{ApplicationError, ApplicationResult},
    },
    domain::post::{Post, PostId, specifications::CanModifyPostSpec},
};

pub struct GetPostQuery {
    pub id: String,
}

/// A post loaded for the edit form together with its current image preview.
#[derive(Debug, Clone)]
pub struct EditablePost {
    pub post: Post,
    pub image_url: String,
}

impl PostQueryService {
    /// `Ok(None)` when no such post exists; the page redirects home.
    pub async fn get_post(
        &self,
        viewer: Option<&Session>,
        query: GetPostQuery,
    ) -> ApplicationResult<Option<PostDetailDto>> {
        let Some(post) = self.find(query.id).await? else {
            return Ok(None);
        };

        let is_author = viewer
            .is_some_and(|session| CanModifyPostSpec::new(&post, &session.user.id).is_satisfied());
        let image_url = self.files.file_preview_url(&post.featured_image);

        Ok(Some(PostDetailDto {
            post: post.into(),
            image_url,
            is_author,
        }))
    }

    pub async fn get_post_for_edit(
        &self,
        session: &Session,
        query: GetPostQuery,
    ) -> ApplicationResult<Option<EditablePost>> {
        let Some(post) = self.find(query.id).await? else {
            return Ok(None);
        };

        if !CanModifyPostSpec::new(&post, &session.user.id).is_satisfied() {
            return Err(ApplicationError::forbidden("only the author may edit this post"));
        }

        let image_url = self.files.file_preview_url(&post.featured_image);
        Ok(Some(EditablePost { post, image_url }))
    }

    async fn find(&self, id: String) -> ApplicationResult<Option<Post>> {
        let Ok(id) = PostId::new(id) else {
            return Ok(None);
        };
        Ok(self.posts.get_post(&id).await?)
    }
}
