// src/config.rs
use crate::application::forms::SlugSyncPolicy;
use crate::infrastructure::backend::AppwriteSettings;
use std::env;
use thiserror::Error;

/// Which backend-as-a-service implementation serves the ports.
#[derive(Clone, Debug)]
pub enum BackendConfig {
    Memory,
    Appwrite(AppwriteSettings),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    backend: BackendConfig,
    session_cookie_name: String,
    session_cookie_secure: bool,
    slug_sync_policy: SlugSyncPolicy,
    allowed_origins: Vec<String>,
    max_upload_bytes: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub const DEFAULT_SESSION_COOKIE: &str = "postdesk_session";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".into()]
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{key} must be a boolean, got `{other}`"
        ))),
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let kind = env::var("BACKEND").unwrap_or_else(|_| "memory".into());
        match kind.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "appwrite" => Ok(Self::Appwrite(AppwriteSettings {
                endpoint: required("APPWRITE_URL")?,
                project_id: required("APPWRITE_PROJECT_ID")?,
                database_id: required("APPWRITE_DATABASE_ID")?,
                collection_id: required("APPWRITE_COLLECTION_ID")?,
                bucket_id: required("APPWRITE_BUCKET_ID")?,
                api_key: required("APPWRITE_API_KEY")?,
            })),
            other => Err(ConfigError::Invalid(format!(
                "BACKEND must be `memory` or `appwrite`, got `{other}`"
            ))),
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for optional keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let backend = BackendConfig::from_env()?;

        let session_cookie_name =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.into());
        if session_cookie_name.is_empty()
            || !session_cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid(
                "SESSION_COOKIE_NAME must be a non-empty cookie token".into(),
            ));
        }

        let session_cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .ok()
            .map(|v| parse_bool("SESSION_COOKIE_SECURE", &v))
            .transpose()?
            .unwrap_or(false);

        let slug_sync_policy = env::var("SLUG_SYNC_POLICY")
            .ok()
            .map(|v| v.parse::<SlugSyncPolicy>().map_err(ConfigError::Invalid))
            .transpose()?
            .unwrap_or_default();

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .map(|v| {
                v.parse::<usize>().map_err(|_| {
                    ConfigError::Invalid(format!("MAX_UPLOAD_BYTES must be a byte count, got `{v}`"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Ok(Self {
            listen_addr,
            backend,
            session_cookie_name,
            session_cookie_secure,
            slug_sync_policy,
            allowed_origins,
            max_upload_bytes,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure
    }

    pub fn slug_sync_policy(&self) -> SlugSyncPolicy {
        self.slug_sync_policy
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
