use axum::http::StatusCode;

mod support;

use support::{
    MultipartBody, NewPostBuilder, TestApp, assert_error_response, assert_redirect, body_json,
    location,
};

use postdesk::application::ports::backend::{FileStorage, FileUpload, PostStore};
use postdesk::domain::post::PostFilter;

#[tokio::test]
async fn create_without_image_fails_locally_without_backend_calls() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let resp = app
        .post_multipart(
            "/add-posts",
            Some(&cookie),
            MultipartBody::post_fields("!Hello world", "!hello-world"),
        )
        .await;

    let json = assert_error_response(resp, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity").await;
    assert_eq!(json["fields"]["image"], "Featured image is required");
    assert_eq!(app.backend.file_count(), 0);
    assert_eq!(app.backend.post_count(), 0);
}

#[tokio::test]
async fn invalid_fields_are_reported_per_field() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let body = MultipartBody::new()
        .text("title", "  ")
        .text("slug", "")
        .text("status", "")
        .png();
    let resp = app.post_multipart("/add-posts", Some(&cookie), body).await;

    let json = assert_error_response(resp, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity").await;
    assert_eq!(json["fields"]["title"], "Title must be at least 3 characters long");
    assert_eq!(json["fields"]["slug"], "Slug is required");
    assert_eq!(json["fields"]["status"], "Status is required");
    assert!(json["fields"]["image"].is_null());
    assert_eq!(app.backend.file_count(), 0);
}

#[tokio::test]
async fn submitted_slug_goes_through_the_slug_transform() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let resp = app
        .post_multipart(
            "/add-posts",
            Some(&cookie),
            MultipartBody::post_fields("Hello world", "Not A Slug At All").png(),
        )
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let posts = app.backend.list_posts(PostFilter::All).await.unwrap();
    assert_eq!(posts[0].slug.as_str(), "-");
}

#[tokio::test]
async fn submitted_slug_keeps_punctuation_but_not_spaces() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let resp = app
        .post_multipart(
            "/add-posts",
            Some(&cookie),
            MultipartBody::post_fields("!Hello world", "?My Own Slug").png(),
        )
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let posts = app.backend.list_posts(PostFilter::All).await.unwrap();
    assert_eq!(posts[0].slug.as_str(), "?my-own-slug");
}

#[tokio::test]
async fn missing_slug_is_derived_from_the_title() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let body = MultipartBody::new()
        .text("title", "!Derived Title")
        .text("content", "<p>body</p>")
        .text("status", "active")
        .png();
    let resp = app.post_multipart("/add-posts", Some(&cookie), body).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let posts = app.backend.list_posts(PostFilter::All).await.unwrap();
    assert_eq!(posts[0].slug.as_str(), "!derived-title");
}

#[tokio::test]
async fn blank_slug_is_derived_from_the_title() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let resp = app
        .post_multipart(
            "/add-posts",
            Some(&cookie),
            MultipartBody::post_fields("!Derived Title", "   ").png(),
        )
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let posts = app.backend.list_posts(PostFilter::All).await.unwrap();
    assert_eq!(posts[0].slug.as_str(), "!derived-title");
}

#[tokio::test]
async fn unsupported_image_types_are_rejected() {
    let app = TestApp::new();
    let (_, cookie) = app.seed_user("Ada", "ada@example.com");

    let body = MultipartBody::post_fields("!Hello world", "!hello-world").file(
        "image",
        "notes.txt",
        "text/plain",
        b"hello",
    );
    let resp = app.post_multipart("/add-posts", Some(&cookie), body).await;

    let json = assert_error_response(resp, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity").await;
    assert!(json["fields"]["image"].is_string());
    assert_eq!(app.backend.file_count(), 0);
}

#[tokio::test]
async fn create_uploads_then_writes_and_navigates_to_the_post() {
    let app = TestApp::new();
    let (user, cookie) = app.seed_user("Ada", "ada@example.com");

    let resp = app
        .post_multipart(
            "/add-posts",
            Some(&cookie),
            MultipartBody::post_fields("!Hello world", "!hello-world").png(),
        )
        .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = location(&resp);
    assert!(target.starts_with("/post/"), "{target}");
    assert_eq!(app.backend.file_count(), 1);

    let posts = app.backend.list_posts(PostFilter::All).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug.as_str(), "!hello-world");
    assert_eq!(posts[0].user_id, user.id);
    assert_eq!(target, format!("/post/{}", posts[0].id));

    let resp = app.get(&target, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["page"], "post");
    assert_eq!(json["post"]["title"], "!Hello world");
    assert_eq!(json["is_author"], true);
    assert_eq!(json["edit_href"], format!("/edit-posts/{}", posts[0].id));
}

#[tokio::test]
async fn post_page_hides_author_actions_from_others() {
    let app = TestApp::new();
    let (author, _) = app.seed_user("Ada", "ada@example.com");
    let post = app
        .backend
        .create_post(NewPostBuilder::new(&author.id).build())
        .await
        .unwrap();

    let resp = app.get(&format!("/post/{}", post.id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["is_author"], false);
    assert!(json.get("edit_href").is_none());
}

#[tokio::test]
async fn missing_post_redirects_home() {
    let app = TestApp::new();
    let resp = app.get("/post/does-not-exist", None).await;
    assert_redirect(&resp, "/");
}

#[tokio::test]
async fn edit_with_new_image_replaces_and_releases_the_old_one() {
    let app = TestApp::new();
    let (author, cookie) = app.seed_user("Ada", "ada@example.com");
    let old_image = app
        .backend
        .upload_file(FileUpload::new("old.png", "image/png", vec![1, 2]))
        .await
        .unwrap();
    let post = app
        .backend
        .create_post(
            NewPostBuilder::new(&author.id)
                .featured_image(&old_image.id)
                .build(),
        )
        .await
        .unwrap();

    let resp = app
        .get(&format!("/edit-posts/{}", post.id), Some(&cookie))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["mode"], "edit");
    assert_eq!(json["values"]["title"], "Test Post");
    assert_eq!(json["values"]["slug"], "-");

    let resp = app
        .post_multipart(
            &format!("/edit-posts/{}", post.id),
            Some(&cookie),
            MultipartBody::post_fields("?Renamed post", "?renamed-post").png(),
        )
        .await;
    assert_redirect(&resp, &format!("/post/{}", post.id));

    let updated = app.backend.get_post(&post.id).await.unwrap().unwrap();
    assert_eq!(updated.title.as_str(), "?Renamed post");
    assert_eq!(updated.slug.as_str(), "?renamed-post");
    assert_ne!(updated.featured_image, old_image.id);
    assert!(!app.backend.has_file(&old_image.id));
    assert!(app.backend.has_file(&updated.featured_image));
}

#[tokio::test]
async fn edit_without_image_keeps_the_current_one() {
    let app = TestApp::new();
    let (author, cookie) = app.seed_user("Ada", "ada@example.com");
    let image = app
        .backend
        .upload_file(FileUpload::new("old.png", "image/png", vec![1]))
        .await
        .unwrap();
    let post = app
        .backend
        .create_post(NewPostBuilder::new(&author.id).featured_image(&image.id).build())
        .await
        .unwrap();

    let body = MultipartBody::new().text("title", "Only the title");
    let resp = app
        .post_multipart(&format!("/edit-posts/{}", post.id), Some(&cookie), body)
        .await;
    assert_redirect(&resp, &format!("/post/{}", post.id));

    let updated = app.backend.get_post(&post.id).await.unwrap().unwrap();
    assert_eq!(updated.title.as_str(), "Only the title");
    assert_eq!(updated.featured_image, image.id);
    assert!(app.backend.has_file(&image.id));
}

#[tokio::test]
async fn only_the_author_may_edit() {
    let app = TestApp::new();
    let (author, _) = app.seed_user("Ada", "ada@example.com");
    let (_, other_cookie) = app.seed_user("Eve", "eve@example.com");
    let post = app
        .backend
        .create_post(NewPostBuilder::new(&author.id).build())
        .await
        .unwrap();

    let resp = app
        .get(&format!("/edit-posts/{}", post.id), Some(&other_cookie))
        .await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;

    let resp = app
        .post_multipart(
            &format!("/edit-posts/{}", post.id),
            Some(&other_cookie),
            MultipartBody::post_fields("Hijacked", "-"),
        )
        .await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn delete_removes_record_and_image() {
    let app = TestApp::new();
    let (author, cookie) = app.seed_user("Ada", "ada@example.com");
    let image = app
        .backend
        .upload_file(FileUpload::new("a.png", "image/png", vec![1]))
        .await
        .unwrap();
    let post = app
        .backend
        .create_post(NewPostBuilder::new(&author.id).featured_image(&image.id).build())
        .await
        .unwrap();

    let resp = app
        .post_empty(&format!("/post/{}/delete", post.id), Some(&cookie))
        .await;

    assert_redirect(&resp, "/");
    assert_eq!(app.backend.post_count(), 0);
    assert!(!app.backend.has_file(&image.id));
}

#[tokio::test]
async fn listings_split_active_and_all_posts() {
    let app = TestApp::new();
    let (author, cookie) = app.seed_user("Ada", "ada@example.com");
    app.backend
        .create_post(NewPostBuilder::new(&author.id).title("Visible post").build())
        .await
        .unwrap();
    app.backend
        .create_post(NewPostBuilder::new(&author.id).title("Draft post").inactive().build())
        .await
        .unwrap();

    let home = body_json(app.get("/", Some(&cookie)).await).await;
    let titles: Vec<_> = home["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(titles, vec!["Visible post"]);
    assert!(home["posts"][0]["image_url"]
        .as_str()
        .unwrap()
        .starts_with("memory://files/"));

    let all = body_json(app.get("/all-posts", Some(&cookie)).await).await;
    assert_eq!(all["posts"].as_array().unwrap().len(), 2);
}
