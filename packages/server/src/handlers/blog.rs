use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::content::markdown;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::blog::{
    BlogPostRequest, BlogPostResponse, PreviewRequest, PreviewResponse, validate_blog_post,
};
use crate::repository::blog as posts;
use crate::state::AppState;

/// Fragment substituted when the editor preview cannot be produced.
const PREVIEW_FAILED: &str = "<p>Preview failed.</p>";

#[utoipa::path(
    post,
    path = "/",
    tag = "Blog",
    operation_id = "createPost",
    summary = "Create a blog post",
    description = "Creates a post. The slug is derived from the title and must not collide with an existing post's slug.",
    request_body = BlogPostRequest,
    responses(
        (status = 201, description = "Post created", body = BlogPostResponse),
        (status = 400, description = "Validation error or duplicate slug (VALIDATION_ERROR, SLUG_CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(title = %payload.title))]
pub async fn create_post(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_blog_post(&payload)?;

    let model = posts::create_post(&state.db, payload).await?;

    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "listPublishedPosts",
    summary = "List published posts",
    description = "Returns all published posts, newest first, with content_html rendered from markdown.",
    responses(
        (status = 200, description = "Published posts", body = Vec<BlogPostResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let models = posts::list_published(&state.db).await?;
    Ok(Json(
        models.into_iter().map(BlogPostResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = "Blog",
    operation_id = "listAllPosts",
    summary = "List every post for the admin area",
    description = "Returns all posts regardless of publish state, newest first.",
    responses(
        (status = 200, description = "All posts", body = Vec<BlogPostResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_all_posts(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let models = posts::list_all(&state.db).await?;
    Ok(Json(
        models.into_iter().map(BlogPostResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blog",
    operation_id = "getPost",
    summary = "Get a post by ID",
    description = "Returns the post regardless of publish state. Used by the admin editor.",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = posts::find_post(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Blog",
    operation_id = "getPostBySlug",
    summary = "Get a published post by slug",
    description = "Public detail page lookup. Unpublished posts are indistinguishable from absent ones.",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post details", body = BlogPostResponse),
        (status = 404, description = "No published post with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug = %slug))]
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = posts::find_published_by_slug(&state.db, &slug).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blog",
    operation_id = "updatePost",
    summary = "Replace a post",
    description = "Replaces the post's fields. The slug is re-derived from the new title and rejected if another post already uses it. A replaced featured image is deleted from storage after the row is updated.",
    params(("id" = i32, Path, description = "Post ID")),
    request_body = BlogPostRequest,
    responses(
        (status = 200, description = "Post updated", body = BlogPostResponse),
        (status = 400, description = "Validation error or duplicate slug (VALIDATION_ERROR, SLUG_CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(id))]
pub async fn update_post(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<BlogPostRequest>,
) -> Result<Json<BlogPostResponse>, AppError> {
    validate_blog_post(&payload)?;

    let model = posts::update_post(
        &state.db,
        &*state.images,
        &state.config.storage.public_base_url,
        id,
        payload,
    )
    .await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blog",
    operation_id = "deletePost",
    summary = "Delete a post",
    description = "Deletes the post row, then its stored featured image (best-effort).",
    params(("id" = i32, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn delete_post(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    posts::delete_post(
        &state.db,
        &*state.images,
        &state.config.storage.public_base_url,
        id,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/preview",
    tag = "Blog",
    operation_id = "previewPost",
    summary = "Render markdown for the editor preview",
    description = "Renders the given markdown to HTML. Never fails on malformed input; a fixed placeholder is substituted if rendering aborts.",
    request_body = PreviewRequest,
    responses(
        (status = 200, description = "Rendered fragment", body = PreviewResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_auth_user, payload))]
pub async fn preview_post(
    _auth_user: AuthUser,
    AppJson(payload): AppJson<PreviewRequest>,
) -> Json<PreviewResponse> {
    // The renderer is total, but the editing UI must survive even if that
    // ever stops being true.
    let html =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| markdown::render(&payload.content)))
            .unwrap_or_else(|_| PREVIEW_FAILED.to_string());

    Json(PreviewResponse { html })
}
