pub mod entity;
pub mod slug;
pub mod specifications;
pub mod value_objects;

pub use entity::{NewPost, Post, PostFilter, PostUpdate};
pub use slug::{slugify, slugify_value};
pub use value_objects::{FileId, PostContent, PostId, PostSlug, PostStatus, PostTitle};
