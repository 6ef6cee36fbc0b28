use std::sync::Arc;

use crate::application::ports::backend::{FileStorage, PostStore};

pub struct PostQueryService {
    pub(super) posts: Arc<dyn PostStore>,
    pub(super) files: Arc<dyn FileStorage>,
}

impl PostQueryService {
    pub fn new(posts: Arc<dyn PostStore>, files: Arc<dyn FileStorage>) -> Self {
        Self { posts, files }
    }
}
