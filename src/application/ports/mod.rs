// src/application/ports/mod.rs
pub mod backend;
pub mod time;
