//! Review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trailhead_core::types::{DbId, Timestamp};

/// Full review row from the `reviews` table.
///
/// `status` is the approval flag: submissions start `false` and only approved
/// reviews are publishable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub review: String,
    pub rating: f64,
    pub status: bool,
    pub trek_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Review row joined with the title of the trek it references.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithTrek {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub review: String,
    pub rating: f64,
    pub status: bool,
    pub trek_id: Option<DbId>,
    pub trek_title: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new review. `status` is intentionally absent: a fresh
/// submission is never pre-approved.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub name: String,
    pub email: String,
    pub review: String,
    pub rating: f64,
    pub trek_id: Option<DbId>,
}

/// Positive/negative rating bucket totals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingCounts {
    pub positive: i64,
    pub negative: i64,
}
