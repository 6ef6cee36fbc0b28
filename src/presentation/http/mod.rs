// src/presentation/http/mod.rs
pub mod controllers;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod multipart;
pub mod route_table;
pub mod routes;
pub mod session_cookie;
pub mod state;
pub mod view;
