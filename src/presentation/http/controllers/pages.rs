use crate::application::queries::posts::ListPostsQuery;
use crate::domain::post::PostFilter;
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::MaybeSession,
    route_table::Page,
    state::HttpState,
    view::{HomeView, PageView},
};
use axum::{Extension, Json};
use serde::Serialize;

const LOGIN_PROMPT: &str = "Login to read posts";

pub async fn home(
    Extension(state): Extension<HttpState>,
    MaybeSession(session): MaybeSession,
) -> HttpResult<Json<PageView<HomeView>>> {
    let body = if session.is_some() {
        let posts = state
            .services
            .post_queries
            .list_posts(ListPostsQuery {
                filter: PostFilter::ActiveOnly,
            })
            .await
            .into_http()?;
        HomeView {
            posts,
            message: None,
        }
    } else {
        HomeView {
            posts: Vec::new(),
            message: Some(LOGIN_PROMPT),
        }
    };

    Ok(PageView::render(Page::Home, session.as_ref(), body))
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
