//! Shared response envelope types for API handlers.
//!
//! Every response body uses the `{ "success": bool, "data": ..., "message": ... }`
//! envelope; list endpoints add a top-level `pagination` block. Use these
//! types instead of ad-hoc `serde_json::json!` maps to get compile-time type
//! safety and consistent serialization.

use serde::Serialize;
use trailhead_core::pagination::{Page, PageMeta};

/// Standard single-payload response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response with a payload and a message.
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }

    /// Successful response with a payload only.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

/// Response envelope for endpoints that return no payload (e.g. logout).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// List response envelope with a pagination block.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PageMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> PagedResponse<T> {
    /// Build from a repository [`Page`] and a message.
    pub fn new(page: Page<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: page.items,
            pagination: page.meta,
            message: Some(message.into()),
        }
    }

    /// Build from already-projected items plus the page metadata.
    pub fn from_parts(items: Vec<T>, meta: PageMeta, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: items,
            pagination: meta,
            message: Some(message.into()),
        }
    }
}
