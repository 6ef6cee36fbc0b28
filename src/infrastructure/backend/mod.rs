pub mod appwrite;
pub mod memory;

pub use appwrite::{AppwriteBackend, AppwriteSettings};
pub use memory::InMemoryBackend;
