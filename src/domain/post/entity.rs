// src/domain/post/entity.rs
use crate::domain::post::value_objects::{
    FileId, PostContent, PostId, PostSlug, PostStatus, PostTitle,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: PostSlug,
    pub content: PostContent,
    pub status: PostStatus,
    pub featured_image: FileId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn is_active(&self) -> bool {
        self.status == PostStatus::Active
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug: PostSlug,
    pub content: PostContent,
    pub status: PostStatus,
    pub featured_image: FileId,
    pub user_id: UserId,
}

/// Full replacement of the editable fields. The featured image is only sent
/// when a new asset was uploaded.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: PostTitle,
    pub slug: PostSlug,
    pub content: PostContent,
    pub status: PostStatus,
    pub featured_image: Option<FileId>,
}

impl PostUpdate {
    pub fn with_featured_image(mut self, file_id: FileId) -> Self {
        self.featured_image = Some(file_id);
        self
    }

    pub fn apply_to(self, post: &mut Post, now: DateTime<Utc>) {
        post.title = self.title;
        post.slug = self.slug;
        post.content = self.content;
        post.status = self.status;
        if let Some(file_id) = self.featured_image {
            post.featured_image = file_id;
        }
        post.updated_at = now;
    }
}

/// Which posts a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    ActiveOnly,
}

impl PostFilter {
    pub fn accepts(&self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::ActiveOnly => post.is_active(),
        }
    }
}
