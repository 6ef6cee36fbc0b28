// tests/support/builders.rs
use std::fmt::Write as _;

use postdesk::domain::post::{
    FileId, NewPost, PostContent, PostSlug, PostStatus, PostTitle,
};
use postdesk::domain::user::UserId;

pub struct NewPostBuilder {
    title: String,
    slug: String,
    content: String,
    status: PostStatus,
    featured_image: String,
    user_id: String,
}

impl NewPostBuilder {
    pub fn new(user_id: &UserId) -> Self {
        Self {
            title: "Test Post".into(),
            slug: "-".into(),
            content: "<p>body</p>".into(),
            status: PostStatus::Active,
            featured_image: "missing-file".into(),
            user_id: user_id.as_str().into(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.status = PostStatus::Inactive;
        self
    }

    pub fn featured_image(mut self, id: &FileId) -> Self {
        self.featured_image = id.as_str().into();
        self
    }

    pub fn build(self) -> NewPost {
        NewPost {
            title: PostTitle::new(self.title).unwrap(),
            slug: PostSlug::new(self.slug).unwrap(),
            content: PostContent::new(self.content),
            status: self.status,
            featured_image: FileId::new(self.featured_image).unwrap(),
            user_id: UserId::new(self.user_id).unwrap(),
        }
    }
}

/// Hand-built `multipart/form-data` body.
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub const BOUNDARY: &'static str = "postdesk-test-boundary";

    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={}", Self::BOUNDARY)
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        let mut head = String::new();
        write!(
            head,
            "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
            Self::BOUNDARY
        )
        .unwrap();
        self.body.extend_from_slice(head.as_bytes());
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        let mut head = String::new();
        write!(
            head,
            "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
            Self::BOUNDARY
        )
        .unwrap();
        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Title, slug, content and status of a valid post.
    pub fn post_fields(title: &str, slug: &str) -> Self {
        Self::new()
            .text("title", title)
            .text("slug", slug)
            .text("content", "<p>Hello</p>")
            .text("status", "active")
    }

    pub fn png(self) -> Self {
        self.file("image", "cover.png", "image/png", &[0x89, b'P', b'N', b'G'])
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", Self::BOUNDARY).as_bytes());
        self.body
    }
}
