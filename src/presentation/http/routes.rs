// src/presentation/http/routes.rs
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::presentation::http::{
    controllers::{auth, pages, post_form, posts},
    guard::auth_layout,
    route_table::{
        DELETE_POST_PATH, FORM_EVENTS_PATH, HEALTH_PATH, LOGOUT_PATH, Page, ROUTES, RouteEntry,
    },
    state::HttpState,
};
use axum::{
    Extension, Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware::{self, Next},
    routing::{MethodRouter, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".into()],
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn page_handlers(page: Page) -> MethodRouter {
    match page {
        Page::Home => get(pages::home),
        Page::Login => get(auth::login_page).post(auth::login),
        Page::Signup => get(auth::signup_page).post(auth::signup),
        Page::AllPosts => get(posts::all_posts),
        Page::AddPost => get(posts::add_post_page).post(posts::create_post),
        Page::EditPost => get(posts::edit_post_page).post(posts::update_post),
        Page::Post => get(posts::post_page),
    }
}

fn guarded(entry: &RouteEntry) -> MethodRouter {
    let requirement = entry.auth;
    page_handlers(entry.page).layer(middleware::from_fn(move |req: Request, next: Next| {
        auth_layout(req, next, requirement)
    }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState) -> Router {
    build_router_with_options(state, &RouterOptions::default())
}

pub fn build_router_with_options(state: HttpState, options: &RouterOptions) -> Router {
    let router = ROUTES
        .iter()
        .fold(Router::new(), |router, entry| {
            router.route(entry.path, guarded(entry))
        });

    router
        .route(HEALTH_PATH, get(pages::health))
        .route(LOGOUT_PATH, post(auth::logout))
        .route(DELETE_POST_PATH, post(posts::delete_post))
        .route(FORM_EVENTS_PATH, post(post_form::apply_event))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}
