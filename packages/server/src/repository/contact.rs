//! Persistence operations for contact submissions.

use sea_orm::*;

use crate::entity::contact;
use crate::error::AppError;
use crate::models::contact::ContactRequest;

/// Store a validated contact-form submission.
pub async fn create_contact<C: ConnectionTrait>(
    db: &C,
    req: ContactRequest,
) -> Result<contact::Model, AppError> {
    let new_contact = contact::ActiveModel {
        name: Set(req.name.trim().to_string()),
        email: Set(req.email.trim().to_string()),
        phone: Set(req.phone.filter(|s| !s.is_empty())),
        message: Set(req.message.trim().to_string()),
        read: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    Ok(new_contact.insert(db).await?)
}

/// List submissions, newest first, optionally filtered by read state.
pub async fn list_contacts<C: ConnectionTrait>(
    db: &C,
    read: Option<bool>,
) -> Result<Vec<contact::Model>, AppError> {
    let mut select = contact::Entity::find();
    if let Some(read) = read {
        select = select.filter(contact::Column::Read.eq(read));
    }
    Ok(select
        .order_by_desc(contact::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Mark a submission as read.
pub async fn mark_read<C: ConnectionTrait>(db: &C, id: i32) -> Result<contact::Model, AppError> {
    let existing = contact::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact submission not found".into()))?;

    let mut active: contact::ActiveModel = existing.into();
    active.read = Set(true);

    Ok(active.update(db).await?)
}
