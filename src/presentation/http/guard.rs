//! AuthLayout: per-route session gate.

use crate::presentation::http::{
    error::HttpError,
    extractors::CurrentSession,
    route_table::{Access, AuthRequirement, check_access},
    state::HttpState,
};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Resolve the session once, then either let the request through with the
/// session attached or redirect it. On public pages a failed lookup counts
/// as no session.
///
/// Usage: `axum::middleware::from_fn(move |req, next| auth_layout(req, next, requirement))`
pub async fn auth_layout(mut req: Request, next: Next, requirement: AuthRequirement) -> Response {
    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::state_missing().into_response();
    };

    let session = match state.resolve_session(req.headers()).await {
        Ok(session) => session,
        Err(err) if requirement == AuthRequirement::Public => {
            tracing::warn!(
                path = %req.uri().path(),
                status = %err.status(),
                "session lookup failed, serving the page as a guest"
            );
            None
        }
        Err(err) => return err.into_response(),
    };

    match check_access(requirement, session.is_some()) {
        Access::Allow => {
            req.extensions_mut().insert(CurrentSession(session));
            next.run(req).await
        }
        Access::Redirect(target) => {
            tracing::info!(path = %req.uri().path(), target, "auth guard redirect");
            Redirect::to(target).into_response()
        }
    }
}
