//! Slug derivation shared by books and FAQ categories.

use slug::slugify;

/// Use the explicit slug when supplied, otherwise derive one from `source`
/// (lowercase, accents folded, non-alphanumerics collapsed to `-`).
pub fn derive_slug(explicit: Option<&str>, source: &str) -> String {
    match explicit {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => slugify(source),
    }
}
