//! Slug derivation for post titles.
//!
//! The transform is deliberately literal: after trimming and lowercasing, a
//! leading run of ASCII letters, digits and whitespace collapses into a
//! single `-`, then every remaining whitespace character becomes `-`.
//! Punctuation is kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static LEADING_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s]+").expect("leading-run pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s").expect("whitespace pattern is valid"));

/// Derive a slug from a title.
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    if lowered.is_empty() {
        return String::new();
    }
    let collapsed = LEADING_RUN.replace(&lowered, "-");
    WHITESPACE.replace_all(&collapsed, "-").into_owned()
}

/// Derive a slug from an arbitrary form value. Anything that is not a string
/// yields an empty slug.
pub fn slugify_value(value: &Value) -> String {
    match value {
        Value::String(text) => slugify(text),
        _ => String::new(),
    }
}
