// src/application/services/mod.rs
use std::sync::Arc;

use crate::application::{
    commands::{auth::AuthCommandService, posts::PostCommandService},
    ports::backend::{AuthService, FileStorage, PostStore},
    queries::posts::PostQueryService,
};

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub auth_commands: Arc<AuthCommandService>,
}

impl ApplicationServices {
    pub fn new(
        posts: Arc<dyn PostStore>,
        files: Arc<dyn FileStorage>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&posts),
            Arc::clone(&files),
        ));
        let post_queries = Arc::new(PostQueryService::new(
            Arc::clone(&posts),
            Arc::clone(&files),
        ));
        let auth_commands = Arc::new(AuthCommandService::new(Arc::clone(&auth)));

        Self {
            post_commands,
            post_queries,
            auth_commands,
        }
    }
}
