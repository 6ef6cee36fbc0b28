//! Live form events: the client posts each field change and receives the
//! synchronized draft back.

use crate::application::forms::{
    FieldErrors, FieldName, FormMode, FormValues, PostForm, SlugSyncPolicy,
};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct FormEventRequest {
    #[serde(default)]
    pub mode: FormMode,
    #[serde(default)]
    pub values: FormValues,
    pub field: FieldName,
    /// Raw input value; any JSON type is accepted.
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct FormEventResponse {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub slug_policy: SlugSyncPolicy,
}

pub async fn apply_event(
    Extension(state): Extension<HttpState>,
    Json(event): Json<FormEventRequest>,
) -> Json<FormEventResponse> {
    let mut form = PostForm::mount(event.mode, event.values, state.slug_policy);
    form.change(event.field, &event.value);
    let (values, errors) = form.into_parts();

    Json(FormEventResponse {
        values,
        errors,
        slug_policy: state.slug_policy,
    })
}
