//! Post authoring form: field values, inline validation and the slug
//! synchronizer.
//!
//! The synchronizer is an ordinary watch observer registered when the form
//! is mounted. Title change events overwrite the slug with the title's
//! derived slug; keystrokes in the slug field are run through the same
//! transform instead. Whether a manual slug edit suppresses later
//! re-derivation is decided by [`SlugSyncPolicy`].

use super::watch::{Subscription, WatchRegistry};
use crate::application::ports::backend::FileUpload;
use crate::domain::errors::DomainError;
use crate::domain::post::{
    Post, PostContent, PostSlug, PostStatus, PostTitle, slugify_value,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const IMAGE_REQUIRED: &str = "Featured image is required";
pub const IMAGE_UNSUPPORTED: &str = "Featured image must be a png, jpg, jpeg or gif file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Title,
    Slug,
    Content,
    Image,
    Status,
}

impl FieldName {
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Slug,
        Self::Content,
        Self::Image,
        Self::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Slug => "slug",
            Self::Content => "content",
            Self::Image => "image",
            Self::Status => "status",
        }
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown form field '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlugSyncPolicy {
    /// A slug keystroke wins for its own event only; the next title change
    /// derives the slug again.
    #[default]
    PerKeystroke,
    /// Once the slug has been typed into, title changes leave it alone.
    LockAfterManualEdit,
}

impl SlugSyncPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerKeystroke => "per-keystroke",
            Self::LockAfterManualEdit => "lock-after-manual-edit",
        }
    }
}

impl FromStr for SlugSyncPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "per-keystroke" => Ok(Self::PerKeystroke),
            "lock-after-manual-edit" => Ok(Self::LockAfterManualEdit),
            other => Err(format!("unknown slug sync policy '{other}'")),
        }
    }
}

/// Create requires a featured image, edit does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub status: String,
    /// Set once the slug field received a keystroke.
    pub slug_edited: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            status: PostStatus::default().as_str().to_owned(),
            slug_edited: false,
        }
    }
}

impl FormValues {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.as_str().to_owned(),
            slug: post.slug.as_str().to_owned(),
            content: post.content.as_str().to_owned(),
            status: post.status.as_str().to_owned(),
            slug_edited: false,
        }
    }

    fn write(&mut self, field: FieldName, value: String) {
        match field {
            FieldName::Title => self.title = value,
            FieldName::Slug => self.slug = value,
            FieldName::Content => self.content = value,
            FieldName::Status => self.status = value,
            FieldName::Image => {}
        }
    }
}

/// Inline error message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FieldName) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn record(&mut self, field: FieldName, error: Option<&DomainError>) {
        match error {
            Some(err) => self.insert(field, err.message()),
            None => self.remove(field),
        }
    }
}

/// One change event: the field and the raw value the user entered.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: FieldName,
    pub value: Value,
}

/// Everything observers can see and change.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub values: FormValues,
    pub image: Option<FileUpload>,
    pub errors: FieldErrors,
    pub mode: FormMode,
}

impl FormState {
    pub fn validate_field(&mut self, field: FieldName) {
        match field {
            FieldName::Title => {
                let result = PostTitle::new(self.values.title.clone());
                self.errors.record(field, result.err().as_ref());
            }
            FieldName::Slug => {
                let result = PostSlug::new(self.values.slug.clone());
                self.errors.record(field, result.err().as_ref());
            }
            FieldName::Status => {
                let result = self.values.status.parse::<PostStatus>();
                self.errors.record(field, result.err().as_ref());
            }
            FieldName::Image => match &self.image {
                None if self.mode == FormMode::Create => self.errors.insert(field, IMAGE_REQUIRED),
                Some(image) if !image.is_accepted_image() => {
                    self.errors.insert(field, IMAGE_UNSUPPORTED);
                }
                _ => self.errors.remove(field),
            },
            FieldName::Content => self.errors.remove(field),
        }
    }
}

/// Validated form contents, ready to submit.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: PostTitle,
    pub slug: PostSlug,
    pub content: PostContent,
    pub status: PostStatus,
    pub image: Option<FileUpload>,
}

pub struct PostForm {
    state: FormState,
    watchers: WatchRegistry<FormState, FieldChange>,
    slug_sync: Option<Subscription>,
}

impl PostForm {
    pub fn mount(mode: FormMode, values: FormValues, policy: SlugSyncPolicy) -> Self {
        let watchers = WatchRegistry::new();
        let slug_sync = watchers.watch(slug_synchronizer(policy));
        Self {
            state: FormState {
                values,
                image: None,
                errors: FieldErrors::default(),
                mode,
            },
            watchers,
            slug_sync: Some(slug_sync),
        }
    }

    pub fn for_create(policy: SlugSyncPolicy) -> Self {
        Self::mount(FormMode::Create, FormValues::default(), policy)
    }

    pub fn for_edit(post: &Post, policy: SlugSyncPolicy) -> Self {
        Self::mount(FormMode::Edit, FormValues::from_post(post), policy)
    }

    /// Register an extra observer for field change events.
    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&mut FormState, &FieldChange) + Send + Sync + 'static,
    {
        self.watchers.watch(callback)
    }

    /// A user change event on `field`.
    pub fn change(&mut self, field: FieldName, value: &Value) {
        if field == FieldName::Image {
            self.state.validate_field(field);
            return;
        }
        self.state.values.write(field, value_text(value));
        let change = FieldChange {
            field,
            value: value.clone(),
        };
        self.watchers.notify(&mut self.state, &change);
        if field == FieldName::Slug {
            self.input_slug(value);
        }
    }

    /// Input handler of the slug field: the raw keystroke value goes through
    /// the slug transform and the result is validated.
    pub fn input_slug(&mut self, raw: &Value) {
        self.state.values.slug = slugify_value(raw);
        self.state.values.slug_edited = true;
        self.state.validate_field(FieldName::Slug);
    }

    /// Programmatic write. Observers are notified like for a change event.
    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>, should_validate: bool) {
        let value = value.into();
        self.state.values.write(field, value.clone());
        if should_validate {
            self.state.validate_field(field);
        }
        let change = FieldChange {
            field,
            value: Value::String(value),
        };
        self.watchers.notify(&mut self.state, &change);
    }

    /// Attach the file input. An empty part (no file chosen) counts as none.
    pub fn attach_image(&mut self, image: Option<FileUpload>) {
        self.state.image = image.filter(|file| !file.is_empty() || !file.file_name.is_empty());
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn mode(&self) -> FormMode {
        self.state.mode
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Stop the slug synchronizer before the form itself goes away.
    pub fn detach_slug_sync(&mut self) {
        if let Some(subscription) = self.slug_sync.take() {
            subscription.unsubscribe();
        }
    }

    /// Validate every field. Errors are kept on the form as well.
    pub fn validate(&mut self) -> Result<PostDraft, FieldErrors> {
        let values = &self.state.values;
        let title = PostTitle::new(values.title.clone());
        let slug = PostSlug::new(values.slug.clone());
        let status = values.status.parse::<PostStatus>();
        let content = PostContent::new(values.content.clone());

        self.state.errors.record(FieldName::Title, title.as_ref().err());
        self.state.errors.record(FieldName::Slug, slug.as_ref().err());
        self.state.errors.record(FieldName::Status, status.as_ref().err());
        self.state.validate_field(FieldName::Image);

        match (title, slug, status) {
            (Ok(title), Ok(slug), Ok(status)) if self.state.errors.is_empty() => Ok(PostDraft {
                title,
                slug,
                content,
                status,
                image: self.state.image.clone(),
            }),
            _ => Err(self.state.errors.clone()),
        }
    }

    pub fn into_parts(self) -> (FormValues, FieldErrors) {
        (self.state.values, self.state.errors)
    }
}

fn slug_synchronizer(
    policy: SlugSyncPolicy,
) -> impl Fn(&mut FormState, &FieldChange) + Send + Sync + 'static {
    move |state: &mut FormState, change: &FieldChange| {
        if change.field != FieldName::Title {
            return;
        }
        if policy == SlugSyncPolicy::LockAfterManualEdit && state.values.slug_edited {
            return;
        }
        state.values.slug = slugify_value(&change.value);
        state.validate_field(FieldName::Slug);
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
