use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::contact::{
    ContactCreatedResponse, ContactListQuery, ContactRequest, ContactResponse, validate_contact,
};
use crate::repository::contact as contacts;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Contact",
    operation_id = "submitContact",
    summary = "Submit the public contact form",
    description = "Validates and stores a contact submission, then notifies the site owner. Notification failures are logged and never fail the request.",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Submission stored", body = ContactCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Store failure (STORE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_contact(&payload)?;

    let model = contacts::create_contact(&state.db, payload).await?;

    if let Err(e) = state.notifier.contact_received(&model).await {
        tracing::warn!(id = model.id, error = %e, "contact notification failed");
    }

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse { id: model.id }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Contact",
    operation_id = "listContacts",
    summary = "List contact submissions",
    description = "Returns submissions newest first, optionally filtered by read state.",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Submissions", body = Vec<ContactResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_contacts(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<Vec<ContactResponse>>, AppError> {
    let models = contacts::list_contacts(&state.db, query.read).await?;
    Ok(Json(models.into_iter().map(ContactResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/{id}/read",
    tag = "Contact",
    operation_id = "markContactRead",
    summary = "Mark a submission as read",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Updated submission", body = ContactResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id))]
pub async fn mark_contact_read(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContactResponse>, AppError> {
    let model = contacts::mark_read(&state.db, id).await?;
    Ok(Json(model.into()))
}
