//! Blog entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trailhead_core::types::{DbId, Timestamp};

/// Full blog row from the `blogs` table.
///
/// `content` is a JSON array of `{heading, paragraph}` sections.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub content: Option<serde_json::Value>,
    pub conclusion: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new blog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlog {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub content: Option<serde_json::Value>,
    pub conclusion: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing blog. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub content: Option<serde_json::Value>,
    pub conclusion: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}
