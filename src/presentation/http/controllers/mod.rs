// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod pages;
pub mod post_form;
pub mod posts;
