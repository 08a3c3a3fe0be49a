//! URL slug helpers.

/// Build a URL-safe slug: lowercase alphanumeric runs joined by single
/// hyphens, everything else dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// The lookup form of a blog title: lowercased with spaces replaced by
/// hyphens. Matches the SQL `LOWER(REPLACE(title, ' ', '-'))` transform used
/// to resolve blog detail requests, so punctuation is preserved.
pub fn title_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}
