// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::application::ports::backend::{FileStorage, PostStore};

pub struct PostCommandService {
    pub(super) posts: Arc<dyn PostStore>,
    pub(super) files: Arc<dyn FileStorage>,
}

impl PostCommandService {
    pub fn new(posts: Arc<dyn PostStore>, files: Arc<dyn FileStorage>) -> Self {
        Self { posts, files }
    }
}
