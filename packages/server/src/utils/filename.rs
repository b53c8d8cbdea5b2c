/// Replace characters outside `[A-Za-z0-9.-]` with underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build a unique object name for an upload: `{unix_millis}-{sanitized}`.
///
/// The millisecond prefix keeps repeated uploads of the same filename from
/// colliding and guarantees the name never starts with a dot.
pub fn unique_object_name(original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0);
    let sanitized = sanitize_filename(original.trim());
    let sanitized = if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    };
    format!("{millis}-{sanitized}")
}

/// Public URL for a stored object.
pub fn public_image_url(public_base_url: &str, name: &str) -> String {
    format!("{}/{}", public_base_url.trim_end_matches('/'), name)
}

/// Extract the object name from one of our public image URLs.
///
/// Returns `None` for URLs outside `public_base_url` (foreign images are
/// never deleted from storage) and for anything that is not a single path
/// component under it.
pub fn object_name_from_url<'a>(public_base_url: &'a str, url: &'a str) -> Option<&'a str> {
    let base = public_base_url.trim_end_matches('/');
    let rest = url.strip_prefix(base)?;
    let name = rest.strip_prefix('/')?;
    if name.is_empty() || name.contains('/') || name.contains('?') {
        return None;
    }
    Some(name)
}
