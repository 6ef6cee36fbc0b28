mod get;
mod list;
mod service;

pub use get::{EditablePost, GetPostQuery};
pub use list::ListPostsQuery;
pub use service::PostQueryService;
