use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::blog::{BlogPostResponse, SearchQuery, SearchResponse};
use crate::repository::blog as posts;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Search",
    operation_id = "searchPosts",
    summary = "Search published posts",
    description = "Case-insensitive substring containment over title, content, and excerpt of published posts, newest first. No relevance ranking.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching posts", body = SearchResponse),
        (status = 400, description = "Missing or blank query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    // Reject before touching the store.
    let q = query.q.as_deref().map(str::trim).unwrap_or("");
    if q.is_empty() {
        return Err(AppError::Validation("Search query is required".into()));
    }

    let models = posts::search_posts(&state.db, q).await?;

    Ok(Json(SearchResponse {
        results: models.into_iter().map(BlogPostResponse::from).collect(),
    }))
}
