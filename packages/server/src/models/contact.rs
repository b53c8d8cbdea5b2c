use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contact;
use crate::error::AppError;
use crate::models::shared::is_valid_email;

/// Request body for the public contact form.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    /// Sender name (1-50 characters).
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Sender email address.
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Optional phone number (at most 20 characters).
    #[serde(default)]
    pub phone: Option<String>,
    /// Message body (1-1000 characters).
    pub message: String,
}

/// Response for a stored contact submission.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactCreatedResponse {
    /// ID of the stored submission.
    #[schema(example = 17)]
    pub id: i32,
}

/// Admin view of a contact submission.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<contact::Model> for ContactResponse {
    fn from(m: contact::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            message: m.message,
            read: m.read,
            created_at: m.created_at,
        }
    }
}

/// Query parameters for the admin contact listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ContactListQuery {
    /// Filter by read state; omit for all submissions.
    pub read: Option<bool>,
}

pub fn validate_contact(req: &ContactRequest) -> Result<(), AppError> {
    let name = req.name.trim();
    if name.is_empty() || name.chars().count() > 50 {
        return Err(AppError::Validation("Name must be 1-50 characters".into()));
    }
    if !is_valid_email(req.email.trim()) {
        return Err(AppError::Validation(
            "A valid email address is required".into(),
        ));
    }
    if let Some(ref phone) = req.phone
        && phone.chars().count() > 20
    {
        return Err(AppError::Validation(
            "Phone must be at most 20 characters".into(),
        ));
    }
    let message = req.message.trim();
    if message.is_empty() || message.chars().count() > 1000 {
        return Err(AppError::Validation(
            "Message must be 1-1000 characters".into(),
        ));
    }
    Ok(())
}
