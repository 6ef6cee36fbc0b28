//! Appwrite REST adapter.
//!
//! Storage, database and account calls go through one `reqwest` client. The
//! server API key authenticates project-level calls; account calls made on
//! behalf of a user carry the session secret in `X-Appwrite-Session`.

use crate::application::{
    dto::SessionToken,
    ports::backend::{
        AuthService, BackendError, BackendErrorKind, BackendResult, FileStorage, FileUpload,
        PostStore, StoredFile,
    },
};
use crate::domain::{
    errors::DomainError,
    post::{
        FileId, NewPost, Post, PostContent, PostFilter, PostId, PostSlug, PostStatus, PostTitle,
        PostUpdate,
    },
    user::{Credentials, DisplayName, Email, NewAccount, User, UserId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use std::fmt;
use std::time::Duration;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const SESSION_HEADER: &str = "X-Appwrite-Session";
const UNIQUE_ID: &str = "unique()";

#[derive(Clone)]
pub struct AppwriteSettings {
    /// API root including the version segment, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub bucket_id: String,
    pub api_key: String,
}

impl fmt::Debug for AppwriteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppwriteSettings")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .field("bucket_id", &self.bucket_id)
            .field("api_key", &"***")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppwriteBackend {
    client: Client,
    settings: AppwriteSettings,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct FileDocument {
    #[serde(rename = "$id")]
    id: String,
    name: String,
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    #[serde(rename = "sizeOriginal", default)]
    size: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostAttributes<'a> {
    title: &'a str,
    slug: &'a str,
    content: &'a str,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PostDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "$updatedAt")]
    updated_at: DateTime<Utc>,
    title: String,
    slug: String,
    #[serde(default)]
    content: String,
    status: String,
    #[serde(rename = "featuredImage")]
    featured_image: String,
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<PostDocument>,
}

#[derive(Debug, Deserialize)]
struct AccountDocument {
    #[serde(rename = "$id")]
    id: String,
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct SessionDocument {
    secret: String,
}

fn malformed(err: &DomainError) -> BackendError {
    BackendError::invalid_response(err.to_string())
}

impl TryFrom<PostDocument> for Post {
    type Error = BackendError;

    fn try_from(doc: PostDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PostId::new(doc.id).map_err(|err| malformed(&err))?,
            title: PostTitle::new(doc.title).map_err(|err| malformed(&err))?,
            slug: PostSlug::new(doc.slug).map_err(|err| malformed(&err))?,
            content: PostContent::new(doc.content),
            status: doc
                .status
                .parse::<PostStatus>()
                .map_err(|err| malformed(&err))?,
            featured_image: FileId::new(doc.featured_image).map_err(|err| malformed(&err))?,
            user_id: UserId::new(doc.user_id).map_err(|err| malformed(&err))?,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

impl TryFrom<AccountDocument> for User {
    type Error = BackendError;

    fn try_from(doc: AccountDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(doc.id).map_err(|err| malformed(&err))?,
            name: DisplayName::new(doc.name).map_err(|err| malformed(&err))?,
            email: Email::new(doc.email).map_err(|err| malformed(&err))?,
        })
    }
}

fn kind_for_status(status: StatusCode) -> BackendErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendErrorKind::Unauthorized,
        StatusCode::NOT_FOUND => BackendErrorKind::NotFound,
        StatusCode::CONFLICT => BackendErrorKind::Conflict,
        StatusCode::TOO_MANY_REQUESTS => BackendErrorKind::Unavailable,
        status if status.is_server_error() => BackendErrorKind::Unavailable,
        _ => BackendErrorKind::Rejected,
    }
}

impl AppwriteBackend {
    pub fn new(settings: AppwriteSettings) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| BackendError::unavailable(err.to_string()))?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Client, mut settings: AppwriteSettings) -> Self {
        settings.endpoint = settings.endpoint.trim_end_matches('/').to_owned();
        Self { client, settings }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.endpoint)
    }

    fn files_path(&self) -> String {
        format!("/storage/buckets/{}/files", self.settings.bucket_id)
    }

    fn documents_path(&self) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.settings.database_id, self.settings.collection_id
        )
    }

    /// Request authenticated with the project API key.
    fn server(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(PROJECT_HEADER, &self.settings.project_id)
            .header(KEY_HEADER, &self.settings.api_key)
    }

    /// Request made on behalf of the user owning `token`.
    fn as_user(&self, builder: RequestBuilder, token: &SessionToken) -> RequestBuilder {
        builder
            .header(PROJECT_HEADER, &self.settings.project_id)
            .header(SESSION_HEADER, token.as_str())
    }

    async fn send(&self, builder: RequestBuilder) -> BackendResult<Response> {
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(error = %err, "appwrite request failed to send");
            BackendError::unavailable(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        tracing::debug!(%status, %message, "appwrite returned an error");
        Err(BackendError::new(kind_for_status(status), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> BackendResult<T> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|err| BackendError::invalid_response(err.to_string()))
    }
}

#[async_trait]
impl FileStorage for AppwriteBackend {
    async fn upload_file(&self, file: FileUpload) -> BackendResult<StoredFile> {
        let part = multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|err| BackendError::rejected(err.to_string()))?;
        let form = multipart::Form::new()
            .text("fileId", UNIQUE_ID)
            .part("file", part);

        let request = self
            .server(self.client.post(self.url(&self.files_path())))
            .multipart(form);
        let doc: FileDocument = self.send_json(request).await?;

        Ok(StoredFile {
            id: FileId::new(doc.id).map_err(|err| malformed(&err))?,
            name: doc.name,
            mime_type: doc.mime_type,
            size: doc.size,
        })
    }

    async fn delete_file(&self, id: &FileId) -> BackendResult<()> {
        let path = format!("{}/{id}", self.files_path());
        self.send(self.server(self.client.delete(self.url(&path))))
            .await?;
        Ok(())
    }

    fn file_preview_url(&self, id: &FileId) -> String {
        format!(
            "{}{}/{id}/preview?project={}",
            self.settings.endpoint,
            self.files_path(),
            self.settings.project_id
        )
    }
}

#[async_trait]
impl PostStore for AppwriteBackend {
    async fn create_post(&self, post: NewPost) -> BackendResult<Post> {
        let data = PostAttributes {
            title: post.title.as_str(),
            slug: post.slug.as_str(),
            content: post.content.as_str(),
            status: post.status.as_str(),
            featured_image: Some(post.featured_image.as_str()),
            user_id: Some(post.user_id.as_str()),
        };
        let request = self
            .server(self.client.post(self.url(&self.documents_path())))
            .json(&json!({ "documentId": UNIQUE_ID, "data": data }));
        self.send_json::<PostDocument>(request).await?.try_into()
    }

    async fn update_post(&self, id: &PostId, update: PostUpdate) -> BackendResult<Post> {
        let data = PostAttributes {
            title: update.title.as_str(),
            slug: update.slug.as_str(),
            content: update.content.as_str(),
            status: update.status.as_str(),
            featured_image: update.featured_image.as_ref().map(FileId::as_str),
            user_id: None,
        };
        let path = format!("{}/{id}", self.documents_path());
        let request = self
            .server(self.client.patch(self.url(&path)))
            .json(&json!({ "data": data }));
        self.send_json::<PostDocument>(request).await?.try_into()
    }

    async fn delete_post(&self, id: &PostId) -> BackendResult<()> {
        let path = format!("{}/{id}", self.documents_path());
        self.send(self.server(self.client.delete(self.url(&path))))
            .await?;
        Ok(())
    }

    async fn get_post(&self, id: &PostId) -> BackendResult<Option<Post>> {
        let path = format!("{}/{id}", self.documents_path());
        match self
            .send_json::<PostDocument>(self.server(self.client.get(self.url(&path))))
            .await
        {
            Ok(doc) => doc.try_into().map(Some),
            Err(err) if err.kind == BackendErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list_posts(&self, filter: PostFilter) -> BackendResult<Vec<Post>> {
        let mut queries = vec![json!({ "method": "orderDesc", "attribute": "$createdAt" })];
        if filter == PostFilter::ActiveOnly {
            queries.push(json!({
                "method": "equal",
                "attribute": "status",
                "values": [PostStatus::Active.as_str()],
            }));
        }
        let query: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_string()))
            .collect();

        let request = self
            .server(self.client.get(self.url(&self.documents_path())))
            .query(&query);
        let list: DocumentList = self.send_json(request).await?;
        list.documents.into_iter().map(Post::try_from).collect()
    }
}

#[async_trait]
impl AuthService for AppwriteBackend {
    async fn create_account(&self, account: NewAccount) -> BackendResult<User> {
        let request = self
            .server(self.client.post(self.url("/account")))
            .json(&json!({
                "userId": UNIQUE_ID,
                "email": account.email.as_str(),
                "password": account.password.expose(),
                "name": account.name.as_str(),
            }));
        self.send_json::<AccountDocument>(request).await?.try_into()
    }

    async fn login(&self, credentials: Credentials) -> BackendResult<SessionToken> {
        let request = self
            .server(self.client.post(self.url("/account/sessions/email")))
            .json(&json!({
                "email": credentials.email.as_str(),
                "password": credentials.password,
            }));
        let session: SessionDocument = self.send_json(request).await?;
        if session.secret.is_empty() {
            return Err(BackendError::invalid_response(
                "session secret missing; the API key needs the sessions.write scope",
            ));
        }
        Ok(SessionToken::new(session.secret))
    }

    async fn current_user(&self, token: &SessionToken) -> BackendResult<Option<User>> {
        let request = self.as_user(self.client.get(self.url("/account")), token);
        match self.send_json::<AccountDocument>(request).await {
            Ok(doc) => doc.try_into().map(Some),
            Err(err) if err.kind == BackendErrorKind::Unauthorized => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn logout(&self, token: &SessionToken) -> BackendResult<()> {
        let request = self.as_user(
            self.client.delete(self.url("/account/sessions/current")),
            token,
        );
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: &str) -> AppwriteSettings {
        AppwriteSettings {
            endpoint: endpoint.into(),
            project_id: "proj".into(),
            database_id: "db".into(),
            collection_id: "posts".into(),
            bucket_id: "images".into(),
            api_key: "key".into(),
        }
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert_eq!(
            kind_for_status(StatusCode::UNAUTHORIZED),
            BackendErrorKind::Unauthorized
        );
        assert_eq!(
            kind_for_status(StatusCode::NOT_FOUND),
            BackendErrorKind::NotFound
        );
        assert_eq!(
            kind_for_status(StatusCode::CONFLICT),
            BackendErrorKind::Conflict
        );
        assert_eq!(
            kind_for_status(StatusCode::BAD_GATEWAY),
            BackendErrorKind::Unavailable
        );
        assert_eq!(
            kind_for_status(StatusCode::TOO_MANY_REQUESTS),
            BackendErrorKind::Unavailable
        );
        assert_eq!(
            kind_for_status(StatusCode::BAD_REQUEST),
            BackendErrorKind::Rejected
        );
    }

    #[test]
    fn preview_url_points_at_the_bucket() {
        let backend = AppwriteBackend::with_client(Client::new(), settings("https://aw.test/v1/"));
        let id = FileId::new("abc").unwrap();
        assert_eq!(
            backend.file_preview_url(&id),
            "https://aw.test/v1/storage/buckets/images/files/abc/preview?project=proj"
        );
    }

    #[test]
    fn documents_with_unknown_status_are_rejected() {
        let doc: PostDocument = serde_json::from_value(json!({
            "$id": "p1",
            "$createdAt": "2024-01-01T00:00:00.000+00:00",
            "$updatedAt": "2024-01-01T00:00:00.000+00:00",
            "title": "Hello",
            "slug": "-",
            "content": "",
            "status": "archived",
            "featuredImage": "f1",
            "userId": "u1",
        }))
        .unwrap();
        let err = Post::try_from(doc).unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::InvalidResponse);
    }
}
