use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::state::AppState;
use crate::utils::filename::{public_image_url, unique_object_name};

/// Image formats accepted for featured images.
const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Body limit layer for the image upload route (8MB; the store enforces the
/// configured per-image limit on top).
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(8 * 1024 * 1024)
}

/// Response for a stored image upload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageUploadResponse {
    /// Public URL of the stored image.
    #[schema(example = "http://localhost:3000/assets/1712345678901-pic.png")]
    pub url: String,
    /// Generated object name.
    #[schema(example = "1712345678901-pic.png")]
    pub filename: String,
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Upload a featured image",
    description = "Stores the `file` multipart field under a generated unique name and returns its public URL. Accepts png, jpg, jpeg, gif, and webp.",
    request_body(content_type = "multipart/form-data", description = "Image file upload"),
    responses(
        (status = 201, description = "Image stored", body = ImageUploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, multipart))]
pub async fn upload_image(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let original = field
                .file_name()
                .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            upload = Some((original, data.to_vec()));
            break;
        }
    }

    let (original, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let extension = original
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(
            "Image must be png, jpg, jpeg, gif, or webp".into(),
        ));
    }
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".into()));
    }

    let name = unique_object_name(&original);
    state.images.put(&name, &data).await?;

    let url = public_image_url(&state.config.storage.public_base_url, &name);

    Ok((
        StatusCode::CREATED,
        Json(ImageUploadResponse {
            url,
            filename: name,
        }),
    ))
}
