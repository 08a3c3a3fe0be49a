//! Trek entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trailhead_core::types::{DbId, Timestamp};

/// Full trek row from the `treks` table.
///
/// `data_type` discriminates standalone treks from multi-day packages.
/// `trek_days` and `gallery_images` are JSON arrays of strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trek {
    pub id: DbId,
    pub data_type: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub currency: String,
    pub duration: String,
    pub difficulty: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub trek_type: String,
    pub distance_km: f64,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub is_featured: bool,
    pub trek_days: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new trek.
///
/// Media fields carry store-relative paths already written by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrek {
    pub data_type: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub currency: Option<String>,
    pub duration: String,
    pub difficulty: String,
    pub trek_type: String,
    pub distance_km: f64,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
    pub trek_days: serde_json::Value,
    pub is_active: Option<bool>,
}

/// DTO for updating an existing trek. All fields are optional; `None` leaves
/// the stored column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrek {
    pub data_type: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub duration: Option<String>,
    pub difficulty: Option<String>,
    pub trek_type: Option<String>,
    pub distance_km: Option<f64>,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub is_featured: Option<bool>,
    pub trek_days: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// Filters accepted by the trek listing.
#[derive(Debug, Clone)]
pub struct TrekListParams {
    pub data_type: Option<String>,
    pub is_active: Option<bool>,
    pub page: i64,
    pub per_page: i64,
}

impl Default for TrekListParams {
    fn default() -> Self {
        Self {
            data_type: None,
            is_active: None,
            page: 1,
            per_page: trailhead_core::pagination::DEFAULT_PER_PAGE,
        }
    }
}
