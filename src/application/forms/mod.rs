pub mod post_form;
pub mod watch;

pub use post_form::{
    FieldChange, FieldErrors, FieldName, FormMode, FormState, FormValues, PostDraft, PostForm, SlugSyncPolicy,
};
pub use watch::{Subscription, WatchRegistry};
