//! Helpers for substring search via SQL (I)LIKE.

/// Escape LIKE wildcards so user input always matches literally.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%term%` pattern for a case-insensitive contains filter.
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}
