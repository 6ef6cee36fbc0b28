pub mod auth;
pub mod navigation;
pub mod posts;

pub use auth::{Session, SessionToken, SessionUserDto};
pub use navigation::Navigation;
pub use posts::{PostCardDto, PostDetailDto, PostDto};
