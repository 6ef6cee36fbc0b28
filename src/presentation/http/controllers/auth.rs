// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::{LoginCommand, SignUpCommand},
    dto::Session,
};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{FormOrJson, MaybeSession, RequireSession},
    route_table::Page,
    state::HttpState,
    view::{AuthFormView, PageView},
};
use axum::{
    Extension, Json,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_page(MaybeSession(session): MaybeSession) -> Json<PageView<AuthFormView>> {
    PageView::render(
        Page::Login,
        session.as_ref(),
        AuthFormView {
            action: Page::Login.path(),
            fields: &["email", "password"],
        },
    )
}

pub async fn signup_page(MaybeSession(session): MaybeSession) -> Json<PageView<AuthFormView>> {
    PageView::render(
        Page::Signup,
        session.as_ref(),
        AuthFormView {
            action: Page::Signup.path(),
            fields: &["name", "email", "password"],
        },
    )
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    FormOrJson(payload): FormOrJson<LoginRequest>,
) -> HttpResult<Response> {
    let session = state
        .services
        .auth_commands
        .login(LoginCommand {
            email: payload.email,
            password: payload.password,
        })
        .await
        .into_http()?;
    signed_in(&state, &session)
}

pub async fn signup(
    Extension(state): Extension<HttpState>,
    FormOrJson(payload): FormOrJson<SignupRequest>,
) -> HttpResult<Response> {
    let session = state
        .services
        .auth_commands
        .sign_up(SignUpCommand {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await
        .into_http()?;
    signed_in(&state, &session)
}

/// Logging out always clears the cookie; a backend that already forgot the
/// session is not an error for the client.
pub async fn logout(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
) -> HttpResult<Response> {
    if let Err(err) = state.services.auth_commands.logout(&session).await {
        tracing::warn!(error = %err, user_id = %session.user.id, "backend logout failed");
    }
    let cookie = state.session_cookie.clear()?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to(Page::Home.path())).into_response())
}

fn signed_in(state: &HttpState, session: &Session) -> HttpResult<Response> {
    let cookie = state.session_cookie.issue(&session.token)?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to(Page::Home.path())).into_response())
}
