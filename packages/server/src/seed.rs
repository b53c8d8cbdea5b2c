use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::admin_user;
use crate::utils::hash;

/// Ensure the configured admin account exists.
///
/// Replaces a manual account-creation step: the account named in the config
/// is created at startup when absent, and left untouched otherwise.
pub async fn ensure_admin_user(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let existing = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&auth.admin_email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let hashed = hash::hash_password(&auth.admin_password)
        .map_err(|e| anyhow::anyhow!("password hash error: {e}"))?;

    let model = admin_user::ActiveModel {
        email: Set(auth.admin_email.clone()),
        password: Set(hashed),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = admin_user::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(admin_user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(_) => {
            info!(email = %auth.admin_email, "seeded admin user");
            Ok(())
        }
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
