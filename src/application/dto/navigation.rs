use crate::domain::post::PostId;

/// Where the client should go after a command completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Home,
    Post(PostId),
}
