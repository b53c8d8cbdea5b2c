//! Persistence operations for blog posts.
//!
//! All functions take the connection explicitly; nothing here touches
//! ambient global state. Slug uniqueness is enforced by a pre-check plus a
//! unique index on the column; a conflicting insert that races past the
//! pre-check is mapped to the same error.

use common::storage::ImageStore;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;

use crate::content::slug::generate_slug;
use crate::entity::blog_post;
use crate::error::AppError;
use crate::models::blog::BlogPostRequest;
use crate::models::shared::escape_like;
use crate::utils::filename::object_name_from_url;

/// Create a post from a validated request.
pub async fn create_post<C: ConnectionTrait>(
    db: &C,
    req: BlogPostRequest,
) -> Result<blog_post::Model, AppError> {
    let slug = generate_slug(req.title.trim());

    let taken = blog_post::Entity::find()
        .filter(blog_post::Column::Slug.eq(&slug))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(AppError::SlugConflict);
    }

    let new_post = blog_post::ActiveModel {
        title: Set(req.title.trim().to_string()),
        slug: Set(slug),
        content: Set(Some(req.content)),
        excerpt: Set(req.excerpt.filter(|s| !s.is_empty())),
        featured_image: Set(req.featured_image.filter(|s| !s.is_empty())),
        published: Set(req.published),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let model = new_post.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("slug race: unique constraint caught on insert");
            AppError::SlugConflict
        }
        _ => AppError::from(e),
    })?;

    Ok(model)
}

/// Fetch a post by id regardless of publish state.
pub async fn find_post<C: ConnectionTrait>(db: &C, id: i32) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}

/// Fetch a published post by slug.
///
/// Unpublished posts are indistinguishable from absent ones on this path.
pub async fn find_published_by_slug<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find()
        .filter(blog_post::Column::Slug.eq(slug))
        .filter(blog_post::Column::Published.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}

/// All published posts, newest first.
pub async fn list_published<C: ConnectionTrait>(db: &C) -> Result<Vec<blog_post::Model>, AppError> {
    Ok(blog_post::Entity::find()
        .filter(blog_post::Column::Published.eq(true))
        .order_by_desc(blog_post::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Every post regardless of publish state, newest first.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<blog_post::Model>, AppError> {
    Ok(blog_post::Entity::find()
        .order_by_desc(blog_post::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Replace a post's fields from a validated request.
///
/// The slug is re-derived from the new title and must not collide with a
/// different post. The row is updated first; if the featured image changed,
/// the previous stored object is deleted afterwards, best-effort.
pub async fn update_post<C: ConnectionTrait>(
    db: &C,
    images: &dyn ImageStore,
    public_base_url: &str,
    id: i32,
    req: BlogPostRequest,
) -> Result<blog_post::Model, AppError> {
    let existing = find_post(db, id).await?;

    let slug = generate_slug(req.title.trim());
    let conflict = blog_post::Entity::find()
        .filter(blog_post::Column::Slug.eq(&slug))
        .filter(blog_post::Column::Id.ne(id))
        .one(db)
        .await?;
    if conflict.is_some() {
        return Err(AppError::SlugConflict);
    }

    let previous_image = existing.featured_image.clone();

    let mut active: blog_post::ActiveModel = existing.into();
    active.title = Set(req.title.trim().to_string());
    active.slug = Set(slug);
    active.content = Set(Some(req.content));
    active.excerpt = Set(req.excerpt.filter(|s| !s.is_empty()));
    active.featured_image = Set(req.featured_image.filter(|s| !s.is_empty()));
    active.published = Set(req.published);
    active.updated_at = Set(Some(chrono::Utc::now()));

    let model = active.update(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SlugConflict,
        _ => AppError::from(e),
    })?;

    if let Some(ref old_url) = previous_image
        && model.featured_image.as_deref() != Some(old_url.as_str())
    {
        discard_stored_image(images, public_base_url, old_url).await;
    }

    Ok(model)
}

/// Delete a post, then its stored featured image, best-effort.
pub async fn delete_post<C: ConnectionTrait>(
    db: &C,
    images: &dyn ImageStore,
    public_base_url: &str,
    id: i32,
) -> Result<(), AppError> {
    let existing = find_post(db, id).await?;

    blog_post::Entity::delete_by_id(id).exec(db).await?;

    if let Some(ref url) = existing.featured_image {
        discard_stored_image(images, public_base_url, url).await;
    }

    Ok(())
}

/// Published posts whose title, content, or excerpt contains the query as a
/// case-insensitive substring, newest first. No ranking.
pub async fn search_posts<C: ConnectionTrait>(
    db: &C,
    query: &str,
) -> Result<Vec<blog_post::Model>, AppError> {
    let term = format!("%{}%", escape_like(query.trim()).to_lowercase());

    let contains = |col: blog_post::Column| {
        Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(term.clone()).escape('\\'))
    };

    let matches = Condition::any()
        .add(contains(blog_post::Column::Title))
        .add(contains(blog_post::Column::Content))
        .add(contains(blog_post::Column::Excerpt));

    Ok(blog_post::Entity::find()
        .filter(blog_post::Column::Published.eq(true))
        .filter(matches)
        .order_by_desc(blog_post::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Remove a stored image referenced by `url`, logging but never failing.
///
/// URLs outside our public base (external images) are left alone.
async fn discard_stored_image(images: &dyn ImageStore, public_base_url: &str, url: &str) {
    let Some(name) = object_name_from_url(public_base_url, url) else {
        return;
    };
    match images.delete(name).await {
        Ok(true) => tracing::debug!(name, "deleted stored featured image"),
        Ok(false) => tracing::debug!(name, "stored featured image already absent"),
        Err(e) => tracing::warn!(name, error = %e, "failed to delete stored featured image"),
    }
}
