// src/presentation/http/extractors.rs
use crate::{
    application::{dto::Session, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;

use super::error::HttpError;

/// Session resolved for the current request, stored in the request
/// extensions by the auth guard so handlers do not look it up twice.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

#[derive(Debug, Clone)]
pub struct RequireSession(pub Session);

async fn session_from_parts(parts: &mut Parts) -> Result<Option<Session>, HttpError> {
    if let Some(CurrentSession(session)) = parts.extensions.get::<CurrentSession>() {
        return Ok(session.clone());
    }

    let state = parts
        .extensions
        .get::<HttpState>()
        .cloned()
        .ok_or_else(HttpError::state_missing)?;
    let session = state.resolve_session(&parts.headers).await?;
    parts.extensions.insert(CurrentSession(session.clone()));
    Ok(session)
}

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_parts(parts).await?))
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts).await?.map(Self).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized("login required"))
        })
    }
}

/// Body accepted either as `application/x-www-form-urlencoded` or JSON.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| HttpError::bad_request(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| HttpError::bad_request(rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}
