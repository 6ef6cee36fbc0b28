use crate::domain::post::Post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: String,
    pub featured_image: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title.into_inner(),
            slug: post.slug.into_inner(),
            content: post.content.into_inner(),
            status: post.status.as_str().to_owned(),
            featured_image: post.featured_image.as_str().to_owned(),
            user_id: post.user_id.into(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Listing entry: title and preview image of one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCardDto {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailDto {
    pub post: PostDto,
    pub image_url: String,
    pub is_author: bool,
}
