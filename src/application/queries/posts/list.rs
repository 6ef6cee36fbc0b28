use super::PostQueryService;
use crate::{
    application::{dto::PostCardDto, error::ApplicationResult},
    domain::post::PostFilter,
};

pub struct ListPostsQuery {
    pub filter: PostFilter,
}

impl PostQueryService {
    pub async fn list_posts(&self, query: ListPostsQuery) -> ApplicationResult<Vec<PostCardDto>> {
        let posts = self.posts.list_posts(query.filter).await?;
        Ok(posts
            .into_iter()
            .map(|post| PostCardDto {
                image_url: self.files.file_preview_url(&post.featured_image),
                id: post.id.into(),
                title: post.title.into_inner(),
            })
            .collect())
    }
}
