// tests/support/helpers.rs
use std::sync::Arc;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{
    Method, Request, StatusCode,
    header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
};
use axum::response::Response;
use serde_json::Value;
use tower::util::ServiceExt as _;

use postdesk::application::dto::SessionToken;
use postdesk::application::forms::SlugSyncPolicy;
use postdesk::application::ports::backend::{AuthService, FileStorage, PostStore};
use postdesk::application::services::ApplicationServices;
use postdesk::domain::user::User;
use postdesk::infrastructure::backend::InMemoryBackend;
use postdesk::presentation::http::{
    routes::build_router, session_cookie::SessionCookie, state::HttpState,
};

use super::builders::MultipartBody;
use super::mocks::FixedClock;

pub const COOKIE_NAME: &str = "postdesk_session";

pub fn build_test_state(
    posts: Arc<dyn PostStore>,
    files: Arc<dyn FileStorage>,
    auth: Arc<dyn AuthService>,
    policy: SlugSyncPolicy,
) -> HttpState {
    HttpState {
        services: Arc::new(ApplicationServices::new(posts, files, auth)),
        session_cookie: SessionCookie::new(COOKIE_NAME, false),
        slug_policy: policy,
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<InMemoryBackend>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(SlugSyncPolicy::default())
    }

    pub fn with_policy(policy: SlugSyncPolicy) -> Self {
        let backend = Arc::new(InMemoryBackend::new(Arc::new(FixedClock::default())));
        let state = build_test_state(backend.clone(), backend.clone(), backend.clone(), policy);
        Self {
            router: build_router(state),
            backend,
        }
    }

    /// Router whose account calls go to `auth`; posts and files stay in memory.
    pub fn with_auth(auth: Arc<dyn AuthService>) -> Self {
        let backend = Arc::new(InMemoryBackend::new(Arc::new(FixedClock::default())));
        let state = build_test_state(
            backend.clone(),
            backend.clone(),
            auth,
            SlugSyncPolicy::default(),
        );
        Self {
            router: build_router(state),
            backend,
        }
    }

    /// A signed-in user and the `Cookie` header value carrying its session.
    pub fn seed_user(&self, name: &str, email: &str) -> (User, String) {
        let (user, token) = self.backend.seed_session(name, email).unwrap();
        (user, cookie_header(&token))
    }

    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        self.send(request(Method::GET, uri, cookie).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_empty(&self, uri: &str, cookie: Option<&str>) -> Response {
        self.send(request(Method::POST, uri, cookie).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, body: &str) -> Response {
        let req = request(Method::POST, uri, cookie)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(req).await
    }

    pub async fn post_json(&self, uri: &str, cookie: Option<&str>, json: &Value) -> Response {
        let req = request(Method::POST, uri, cookie)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        self.send(req).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        cookie: Option<&str>,
        body: MultipartBody,
    ) -> Response {
        let req = request(Method::POST, uri, cookie)
            .header(CONTENT_TYPE, MultipartBody::content_type())
            .body(Body::from(body.finish()))
            .unwrap();
        self.send(req).await
    }
}

fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub fn cookie_header(token: &SessionToken) -> String {
    format!("{COOKIE_NAME}={}", token.as_str())
}

/// `name=value` pair of the response's session cookie, if one was set.
pub fn session_cookie_pair(resp: &Response) -> Option<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{COOKIE_NAME}=")))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

pub fn assert_redirect(resp: &Response, target: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(location, target);
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert an error body `{ "error", "message" }` with the expected status.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = body_json(resp).await;
    assert_eq!(json["error"], expected_error);
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected a non-empty message"
    );
    json
}
