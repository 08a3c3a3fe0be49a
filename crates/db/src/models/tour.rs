//! Tour entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trailhead_core::types::{DbId, Timestamp};

/// Full tour row from the `tours` table.
///
/// The JSON columns stay opaque: `inclusions`, `exclusions`, and `tags` are
/// arrays of strings; `accommodation_details`, `meal_plan`, and `itinerary`
/// are free-form arrays of records.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tour {
    pub id: DbId,
    pub title: String,
    pub destination: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub price: f64,
    pub currency: String,
    pub discount_price: Option<f64>,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub difficulty_level: String,
    pub max_group_size: i32,
    pub min_group_size: i32,
    pub tour_type: String,
    pub inclusions: Option<serde_json::Value>,
    pub exclusions: Option<serde_json::Value>,
    pub accommodation_details: Option<serde_json::Value>,
    pub meal_plan: Option<serde_json::Value>,
    pub itinerary: Option<serde_json::Value>,
    pub guide_included: bool,
    pub guide_language: String,
    pub porter_included: bool,
    pub requirements: Option<String>,
    pub what_to_bring: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub available_slots: i32,
    pub instant_booking: bool,
    pub slug: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new tour.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTour {
    pub title: String,
    pub destination: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub price: f64,
    pub currency: Option<String>,
    pub discount_price: Option<f64>,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub difficulty_level: String,
    pub max_group_size: Option<i32>,
    pub min_group_size: Option<i32>,
    pub tour_type: String,
    pub inclusions: Option<serde_json::Value>,
    pub exclusions: Option<serde_json::Value>,
    pub accommodation_details: Option<serde_json::Value>,
    pub meal_plan: Option<serde_json::Value>,
    pub itinerary: Option<serde_json::Value>,
    pub guide_included: Option<bool>,
    pub guide_language: Option<String>,
    pub porter_included: Option<bool>,
    pub requirements: Option<String>,
    pub what_to_bring: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_popular: Option<bool>,
    pub available_slots: Option<i32>,
    pub instant_booking: Option<bool>,
    pub slug: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Option<serde_json::Value>,
}

/// DTO for updating an existing tour. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTour {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Option<serde_json::Value>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub discount_price: Option<f64>,
    pub duration_days: Option<i32>,
    pub duration_nights: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub difficulty_level: Option<String>,
    pub max_group_size: Option<i32>,
    pub min_group_size: Option<i32>,
    pub tour_type: Option<String>,
    pub inclusions: Option<serde_json::Value>,
    pub exclusions: Option<serde_json::Value>,
    pub accommodation_details: Option<serde_json::Value>,
    pub meal_plan: Option<serde_json::Value>,
    pub itinerary: Option<serde_json::Value>,
    pub guide_included: Option<bool>,
    pub guide_language: Option<String>,
    pub porter_included: Option<bool>,
    pub requirements: Option<String>,
    pub what_to_bring: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_popular: Option<bool>,
    pub available_slots: Option<i32>,
    pub instant_booking: Option<bool>,
    pub slug: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Option<serde_json::Value>,
}

/// Filters, sort, and pagination accepted by the tour listing.
#[derive(Debug, Clone)]
pub struct TourListParams {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_popular: Option<bool>,
    pub tour_type: Option<String>,
    pub difficulty_level: Option<String>,
    /// Substring match on `destination`.
    pub destination: Option<String>,
    /// Substring match on `title`.
    pub search: Option<String>,
    /// Validated against a column whitelist before hitting SQL.
    pub sort_by: &'static str,
    /// `"ASC"` or `"DESC"`.
    pub sort_order: &'static str,
    pub page: i64,
    pub per_page: i64,
}

impl Default for TourListParams {
    fn default() -> Self {
        Self {
            is_active: None,
            is_featured: None,
            is_popular: None,
            tour_type: None,
            difficulty_level: None,
            destination: None,
            search: None,
            sort_by: trailhead_core::tours::DEFAULT_SORT_COLUMN,
            sort_order: "DESC",
            page: 1,
            per_page: trailhead_core::pagination::DEFAULT_PER_PAGE,
        }
    }
}
