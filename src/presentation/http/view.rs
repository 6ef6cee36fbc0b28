//! JSON view models rendered by the page routes.

use crate::application::{
    dto::{PostCardDto, PostDetailDto, Session, SessionUserDto},
    forms::{FieldErrors, FormMode, FormValues, SlugSyncPolicy},
};
use crate::domain::post::PostStatus;
use crate::presentation::http::route_table::Page;
use axum::Json;
use serde::Serialize;

/// Envelope shared by every page: which page rendered and who is signed in.
#[derive(Debug, Serialize)]
pub struct PageView<T: Serialize> {
    pub page: Page,
    pub user: Option<SessionUserDto>,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> PageView<T> {
    pub fn render(page: Page, session: Option<&Session>, body: T) -> Json<Self> {
        Json(Self {
            page,
            user: session.map(|session| SessionUserDto::from(&session.user)),
            body,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub posts: Vec<PostCardDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct PostListView {
    pub posts: Vec<PostCardDto>,
}

#[derive(Debug, Serialize)]
pub struct AuthFormView {
    pub action: &'static str,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub detail: PostDetailDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_href: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostFormView {
    pub mode: FormMode,
    pub action: String,
    pub values: FormValues,
    pub errors: FieldErrors,
    pub image_url: Option<String>,
    pub statuses: Vec<&'static str>,
    pub accepted_images: &'static [&'static str],
    pub slug_policy: SlugSyncPolicy,
}

impl PostFormView {
    pub fn new(mode: FormMode, action: String, values: FormValues, policy: SlugSyncPolicy) -> Self {
        Self {
            mode,
            action,
            values,
            errors: FieldErrors::default(),
            image_url: None,
            statuses: PostStatus::ALL.iter().map(PostStatus::as_str).collect(),
            accepted_images: &crate::application::ports::backend::FileUpload::ACCEPTED_TYPES,
            slug_policy: policy,
        }
    }
}
