//! Activity entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trailhead_core::types::{DbId, Timestamp};

/// Full activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub currency: String,
    pub duration: String,
    pub difficulty: String,
    pub category: String,
    pub min_age: Option<i32>,
    pub max_participants: Option<i32>,
    pub description: Option<String>,
    pub inclusions: Option<String>,
    pub requirements: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub is_featured: bool,
    pub is_active: bool,
    pub season: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub title: String,
    pub location: String,
    pub price: f64,
    pub currency: Option<String>,
    pub duration: String,
    pub difficulty: String,
    pub category: String,
    pub min_age: Option<i32>,
    pub max_participants: Option<i32>,
    pub description: Option<String>,
    pub inclusions: Option<String>,
    pub requirements: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub season: Option<String>,
}

/// DTO for updating an existing activity. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivity {
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub duration: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub min_age: Option<i32>,
    pub max_participants: Option<i32>,
    pub description: Option<String>,
    pub inclusions: Option<String>,
    pub requirements: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub season: Option<String>,
}

/// Filters accepted by the activity listing.
#[derive(Debug, Clone)]
pub struct ActivityListParams {
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub page: i64,
    pub per_page: i64,
}

impl Default for ActivityListParams {
    fn default() -> Self {
        Self {
            category: None,
            is_active: None,
            is_featured: None,
            page: 1,
            per_page: trailhead_core::pagination::DEFAULT_PER_PAGE,
        }
    }
}
