pub mod backend;
pub mod security;
pub mod time;
