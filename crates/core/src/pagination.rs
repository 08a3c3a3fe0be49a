//! Page-number pagination primitives.
//!
//! List endpoints accept `page` / `per_page` query parameters and reply with a
//! [`PageMeta`] block alongside the items. Requested values are clamped here
//! so repositories can interpolate them safely.

use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Upper bound for client-requested page sizes.
pub const MAX_PER_PAGE: i64 = 100;

/// Pagination block returned alongside list payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl PageMeta {
    /// Compute the metadata block for a page of a `total`-row result set.
    ///
    /// `last_page` is at least 1 even for an empty result set.
    pub fn new(current_page: i64, per_page: i64, total: i64) -> Self {
        let last_page = if total <= 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            current_page,
            last_page,
            per_page,
            total,
        }
    }
}

/// One page of rows plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Clamp a requested page number to `>= 1` (default 1).
pub fn clamp_page(requested: Option<i64>) -> i64 {
    requested.unwrap_or(1).max(1)
}

/// Clamp a requested page size to `1..=MAX_PER_PAGE`, falling back to
/// `default` when absent.
pub fn clamp_per_page(requested: Option<i64>, default: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, MAX_PER_PAGE)
}

/// Row offset of a (1-based) page.
pub fn offset(page: i64, per_page: i64) -> i64 {
    (page - 1) * per_page
}
