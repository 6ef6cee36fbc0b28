use crate::application::{
    commands::posts::{DeletePostCommand, SubmitPostCommand},
    dto::Session,
    forms::{FormMode, FormValues, PostForm},
    queries::posts::{GetPostQuery, ListPostsQuery},
};
use crate::domain::post::{Post, PostFilter};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::{MaybeSession, RequireSession},
    multipart::{PostFormSubmission, read_post_form},
    route_table::{DELETE_POST_PATH, Page, fill, navigation_href},
    state::HttpState,
    view::{PageView, PostFormView, PostListView, PostView},
};
use axum::{
    Extension, Json,
    extract::{Multipart, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

pub async fn all_posts(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
) -> HttpResult<Json<PageView<PostListView>>> {
    let posts = state
        .services
        .post_queries
        .list_posts(ListPostsQuery {
            filter: PostFilter::All,
        })
        .await
        .into_http()?;
    Ok(PageView::render(
        Page::AllPosts,
        Some(&session),
        PostListView { posts },
    ))
}

pub async fn post_page(
    Extension(state): Extension<HttpState>,
    MaybeSession(session): MaybeSession,
    Path(slug): Path<String>,
) -> HttpResult<Response> {
    let detail = state
        .services
        .post_queries
        .get_post(session.as_ref(), GetPostQuery { id: slug })
        .await
        .into_http()?;

    let Some(detail) = detail else {
        return Ok(Redirect::to(Page::Home.path()).into_response());
    };

    let (edit_href, delete_href) = if detail.is_author {
        (
            Some(Page::EditPost.href(&detail.post.id)),
            Some(fill(DELETE_POST_PATH, &detail.post.id)),
        )
    } else {
        (None, None)
    };

    Ok(PageView::render(
        Page::Post,
        session.as_ref(),
        PostView {
            detail,
            edit_href,
            delete_href,
        },
    )
    .into_response())
}

pub async fn add_post_page(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
) -> Json<PageView<PostFormView>> {
    PageView::render(
        Page::AddPost,
        Some(&session),
        PostFormView::new(
            FormMode::Create,
            Page::AddPost.path().to_owned(),
            FormValues::default(),
            state.slug_policy,
        ),
    )
}

pub async fn edit_post_page(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
    Path(slug): Path<String>,
) -> HttpResult<Response> {
    let editable = state
        .services
        .post_queries
        .get_post_for_edit(&session, GetPostQuery { id: slug })
        .await
        .into_http()?;

    let Some(editable) = editable else {
        return Ok(Redirect::to(Page::Home.path()).into_response());
    };

    let mut view = PostFormView::new(
        FormMode::Edit,
        Page::EditPost.href(editable.post.id.as_str()),
        FormValues::from_post(&editable.post),
        state.slug_policy,
    );
    view.image_url = Some(editable.image_url);

    Ok(PageView::render(Page::EditPost, Some(&session), view).into_response())
}

pub async fn create_post(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
    multipart: Multipart,
) -> HttpResult<Response> {
    let submission = read_post_form(multipart).await?;
    submit(&state, &session, FormMode::Create, FormValues::default(), submission, None).await
}

pub async fn update_post(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> HttpResult<Response> {
    let editable = state
        .services
        .post_queries
        .get_post_for_edit(&session, GetPostQuery { id: slug })
        .await
        .into_http()?
        .ok_or_else(|| HttpError::new(StatusCode::NOT_FOUND, "post not found"))?;

    let submission = read_post_form(multipart).await?;
    let values = FormValues::from_post(&editable.post);
    submit(
        &state,
        &session,
        FormMode::Edit,
        values,
        submission,
        Some(editable.post),
    )
    .await
}

/// Validate the submitted form locally; only a valid draft reaches the
/// backend.
async fn submit(
    state: &HttpState,
    session: &Session,
    mode: FormMode,
    values: FormValues,
    submission: PostFormSubmission,
    editing: Option<Post>,
) -> HttpResult<Response> {
    let draft = {
        let mut form = PostForm::mount(mode, values, state.slug_policy);
        let image = submission.replay_on(&mut form);
        form.attach_image(image);
        form.validate()
    }
    .map_err(|errors| {
        tracing::debug!(invalid_fields = errors.len(), "post form rejected");
        HttpError::invalid_form(errors)
    })?;

    let navigation = state
        .services
        .post_commands
        .submit(session, SubmitPostCommand { draft, editing })
        .await
        .into_http()?;

    Ok(Redirect::to(&navigation_href(&navigation)).into_response())
}

pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    RequireSession(session): RequireSession,
    Path(slug): Path<String>,
) -> HttpResult<Response> {
    let navigation = state
        .services
        .post_commands
        .delete_post(&session, DeletePostCommand { id: slug })
        .await
        .into_http()?;
    Ok(Redirect::to(&navigation_href(&navigation)).into_response())
}
