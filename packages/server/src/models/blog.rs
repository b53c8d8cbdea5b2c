use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::markdown;
use crate::entity::blog_post;
use crate::error::AppError;
use crate::models::shared::{is_valid_url, validate_title};

/// Request body for creating or replacing a blog post.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct BlogPostRequest {
    /// Post title (1-100 characters). The slug is derived from it.
    #[schema(example = "Hello World")]
    pub title: String,
    /// Markdown source of the post body.
    #[schema(example = "# Hi\nthere")]
    pub content: String,
    /// Optional summary shown on listings (at most 200 characters).
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Optional public URL of the featured image.
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Whether the post is publicly visible.
    #[serde(default)]
    pub published: bool,
}

/// Public shape of a blog post.
///
/// `content_html` is rendered from `content` on every read; the row never
/// stores HTML, so it cannot go stale.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub content_html: String,
    pub excerpt: String,
    pub featured_image: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<blog_post::Model> for BlogPostResponse {
    fn from(m: blog_post::Model) -> Self {
        let content = m.content.unwrap_or_default();
        let content_html = markdown::render(&content);
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            content,
            content_html,
            excerpt: m.excerpt.unwrap_or_default(),
            featured_image: m.featured_image.unwrap_or_default(),
            published: m.published,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request body for the markdown preview endpoint.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PreviewRequest {
    /// Markdown source to render.
    pub content: String,
}

/// Rendered preview fragment.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PreviewResponse {
    pub html: String,
}

/// Search results wrapper.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub results: Vec<BlogPostResponse>,
}

/// Query parameters for the search endpoint.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Search term, matched as a case-insensitive substring of title,
    /// content, or excerpt.
    pub q: Option<String>,
}

pub fn validate_blog_post(req: &BlogPostRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("Content must not be empty".into()));
    }
    if let Some(ref excerpt) = req.excerpt
        && excerpt.chars().count() > 200
    {
        return Err(AppError::Validation(
            "Excerpt must be at most 200 characters".into(),
        ));
    }
    if let Some(ref url) = req.featured_image
        && !url.is_empty()
        && !is_valid_url(url)
    {
        return Err(AppError::Validation(
            "Featured image must be a valid URL".into(),
        ));
    }
    Ok(())
}
