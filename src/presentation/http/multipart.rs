//! Reads the post form from a `multipart/form-data` body.

use crate::application::{
    forms::{FieldName, PostForm},
    ports::backend::FileUpload,
};
use axum::extract::{Multipart, multipart::MultipartError};
use serde_json::Value;

use super::error::{HttpError, HttpResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Default)]
pub struct PostFormSubmission {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub image: Option<FileUpload>,
}

impl PostFormSubmission {
    /// Replay the submitted text fields on `form` as user input, returning
    /// the file. The title goes through the slug synchronizer and a
    /// non-blank submitted slug through the slug keystroke handler, so the
    /// stored slug is always derived text.
    pub fn replay_on(self, form: &mut PostForm) -> Option<FileUpload> {
        if let Some(title) = self.title {
            form.change(FieldName::Title, &Value::String(title));
        }
        if let Some(content) = self.content {
            form.change(FieldName::Content, &Value::String(content));
        }
        if let Some(status) = self.status {
            form.change(FieldName::Status, &Value::String(status));
        }
        if let Some(slug) = self.slug.filter(|slug| !slug.trim().is_empty()) {
            form.input_slug(&Value::String(slug));
        }
        self.image
    }
}

fn rejected(err: &MultipartError) -> HttpError {
    HttpError::new(err.status(), err.body_text())
}

pub async fn read_post_form(mut multipart: Multipart) -> HttpResult<PostFormSubmission> {
    let mut submission = PostFormSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| rejected(&e))? {
        let Some(name) = field.name().and_then(|name| name.parse::<FieldName>().ok()) else {
            tracing::debug!(field = ?field.name(), "ignoring unknown form field");
            continue;
        };

        if name == FieldName::Image {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content_type = field
                .content_type()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_owned();
            let bytes = field.bytes().await.map_err(|e| rejected(&e))?;
            submission.image = Some(FileUpload::new(file_name, content_type, bytes));
            continue;
        }

        let text = field.text().await.map_err(|e| rejected(&e))?;
        match name {
            FieldName::Title => submission.title = Some(text),
            FieldName::Slug => submission.slug = Some(text),
            FieldName::Content => submission.content = Some(text),
            FieldName::Status => submission.status = Some(text),
            FieldName::Image => {}
        }
    }

    Ok(submission)
}
