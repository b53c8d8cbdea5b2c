use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Email of the admin account.
    #[schema(example = "admin@example.com")]
    pub email: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
///
/// The token is also set as the `session` cookie for browser clients.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Authenticated admin's email.
    #[schema(example = "admin@example.com")]
    pub email: String,
}

/// Current authenticated admin's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    /// Admin user ID.
    #[schema(example = 1)]
    pub id: i32,
    /// Email.
    #[schema(example = "admin@example.com")]
    pub email: String,
}
