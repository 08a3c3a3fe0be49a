//! Pure string-to-value coercions applied before validation.
//!
//! Multipart form fields always arrive as strings. Clients send booleans as
//! `"true"`/`"1"`, list fields either as a JSON array string or as a
//! comma-separated string, and structured fields as JSON strings. Each parser
//! here returns `None` when the raw text cannot be coerced; the caller turns
//! that into a per-field validation message.

/// Parse a form boolean.
///
/// Accepts `1`/`0`, `true`/`false`, `on`/`off`, and `yes`/`no`
/// (case-insensitive, surrounding whitespace ignored).
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a list of strings from either a JSON array or a comma-separated string.
///
/// `["a", "b"]` parses as JSON; anything else is split on commas with each
/// part trimmed and empty parts dropped. Returns `None` only when the raw text
/// looks like JSON but is not an array of strings.
pub fn parse_string_list(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(trimmed).ok();
    }
    Some(
        trimmed
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
    )
}

/// Parse an arbitrary JSON value from a string field.
pub fn parse_json(raw: &str) -> Option<serde_json::Value> {
    serde_json::from_str(raw.trim()).ok()
}

/// Parse a signed integer, tolerating surrounding whitespace.
pub fn parse_i64(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parse a float, tolerating surrounding whitespace.
pub fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
