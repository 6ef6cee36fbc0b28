use crate::domain::post::entity::Post;
use crate::domain::user::UserId;

/// Only the author of a post may edit or delete it.
pub struct CanModifyPostSpec<'a> {
    post: &'a Post,
    user_id: &'a UserId,
}

impl<'a> CanModifyPostSpec<'a> {
    pub fn new(post: &'a Post, user_id: &'a UserId) -> Self {
        Self { post, user_id }
    }

    pub fn is_satisfied(&self) -> bool {
        self.post.is_owned_by(self.user_id)
    }
}
