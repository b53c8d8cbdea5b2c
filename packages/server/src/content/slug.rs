//! Slug derivation for blog post URLs.

use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derive a URL-safe slug from a post title.
///
/// Titles made of basic Latin characters produce a deterministic slug:
/// lowercased, punctuation stripped, whitespace runs collapsed into single
/// hyphens. Titles containing any other script fall back to an entropy-based
/// slug: an optional hyphen-joined prefix of the Latin word characters in
/// the title, followed by a base-36 fragment of the current time and a
/// random base-36 fragment. Repeated calls on such titles yield different
/// slugs.
///
/// The fallback is also taken when the deterministic form strips to
/// nothing, so the result is never empty.
pub fn generate_slug(title: &str) -> String {
    if title.is_ascii() {
        let slug = hyphenate_latin(title);
        if !slug.is_empty() {
            return slug;
        }
    }
    suffixed_slug(title)
}

/// Keep ASCII word characters and spaces, lowercase, hyphenate word runs.
fn hyphenate_latin(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() {
                ' '
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Entropy branch: latin prefix (possibly empty) + time + random fragment.
fn suffixed_slug(title: &str) -> String {
    let mut prefix = hyphenate_latin(title);
    if !prefix.is_empty() {
        prefix.push('-');
    }

    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let ts = to_base36(millis);
    let ts_tail: String = ts.chars().skip(ts.len().saturating_sub(4)).collect();

    let mut rng = rand::rng();
    let random: String = (0..4)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("{prefix}{ts_tail}-{random}")
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    while n > 0 {
        out.insert(0, BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    out
}
