//! Response projections for catalogue rows.
//!
//! Rows come out of `trailhead-db` carrying store-relative media paths; the
//! types here expand those to absolute URLs under `/storage/` and reshape the
//! flat columns into the blocks the frontend consumes (tour duration, group
//! size, booking). Handlers wrap these in the envelopes from
//! [`crate::response`].

use serde::Serialize;
use serde_json::{json, Value};
use trailhead_core::types::{DbId, Timestamp};
use trailhead_db::models::activity::Activity;
use trailhead_db::models::blog::Blog;
use trailhead_db::models::review::ReviewWithTrek;
use trailhead_db::models::tour::Tour;
use trailhead_db::models::trek::Trek;

use crate::uploads;

/// Absolute URL for a store-relative media path.
pub fn storage_url(base_url: &str, relative: &str) -> String {
    format!("{}/storage/{}", base_url.trim_end_matches('/'), relative)
}

fn optional_url(base_url: &str, relative: Option<&str>) -> Option<String> {
    relative.map(|rel| storage_url(base_url, rel))
}

/// URLs for every entry of a JSON gallery column. A null or malformed column
/// yields an empty list.
fn gallery_urls(base_url: &str, gallery: Option<&Value>) -> Vec<String> {
    uploads::stored_paths(gallery)
        .iter()
        .map(|rel| storage_url(base_url, rel))
        .collect()
}

/// Pass a JSON array column through, substituting `[]` for NULL.
fn array_or_empty(value: Option<&Value>) -> Value {
    match value {
        Some(v) if !v.is_null() => v.clone(),
        _ => json!([]),
    }
}

// ---------------------------------------------------------------------------
// Treks
// ---------------------------------------------------------------------------

/// Trek row shaped for API responses.
#[derive(Debug, Serialize)]
pub struct TrekView {
    pub id: DbId,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub duration: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub trek_type: String,
    pub distance_km: f64,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub featured_image_url: Option<String>,
    pub gallery_images: Option<Value>,
    pub gallery_images_urls: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub currency: String,
    pub data_type: String,
    pub trek_days: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TrekView {
    pub fn new(trek: &Trek, base_url: &str) -> Self {
        Self {
            id: trek.id,
            title: trek.title.clone(),
            location: trek.location.clone(),
            price: trek.price,
            duration: trek.duration.clone(),
            difficulty: trek.difficulty.clone(),
            trek_type: trek.trek_type.clone(),
            distance_km: trek.distance_km,
            description: trek.description.clone(),
            featured_image: trek.featured_image.clone(),
            featured_image_url: optional_url(base_url, trek.featured_image.as_deref()),
            gallery_images: trek.gallery_images.clone(),
            gallery_images_urls: gallery_urls(base_url, trek.gallery_images.as_ref()),
            is_featured: trek.is_featured,
            is_active: trek.is_active,
            currency: trek.currency.clone(),
            data_type: trek.data_type.clone(),
            trek_days: trek.trek_days.clone(),
            created_at: trek.created_at,
            updated_at: trek.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Tours
// ---------------------------------------------------------------------------

/// Tour row shaped for API responses.
///
/// Media fields are URL-only here; related columns are grouped into nested
/// blocks and the JSON array columns default to `[]`.
#[derive(Debug, Serialize)]
pub struct TourView {
    pub id: DbId,
    pub title: String,
    pub destination: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub gallery_images: Vec<String>,
    pub price: f64,
    pub currency: String,
    pub discount_price: Option<f64>,
    pub has_discount: bool,
    pub duration: TourDuration,
    pub dates: TourDates,
    pub difficulty_level: String,
    pub group_size: TourGroupSize,
    pub tour_type: String,
    pub inclusions: Value,
    pub exclusions: Value,
    pub accommodation_details: Value,
    pub meal_plan: Value,
    pub itinerary: Value,
    pub guide: TourGuide,
    pub porter_included: bool,
    pub requirements: Option<String>,
    pub what_to_bring: Option<String>,
    pub status: TourStatus,
    pub booking: TourBooking,
    pub slug: Option<String>,
    pub meta_description: Option<String>,
    pub tags: Value,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct TourDuration {
    pub days: i32,
    pub nights: i32,
    /// Display form, e.g. `"5 Days / 4 Nights"`.
    pub formatted: String,
}

#[derive(Debug, Serialize)]
pub struct TourDates {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TourGroupSize {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Serialize)]
pub struct TourGuide {
    pub included: bool,
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct TourStatus {
    pub is_active: bool,
    pub is_featured: bool,
    pub is_popular: bool,
}

#[derive(Debug, Serialize)]
pub struct TourBooking {
    pub available_slots: i32,
    pub instant_booking: bool,
}

impl TourView {
    pub fn new(tour: &Tour, base_url: &str) -> Self {
        Self {
            id: tour.id,
            title: tour.title.clone(),
            destination: tour.destination.clone(),
            description: tour.description.clone(),
            featured_image: optional_url(base_url, tour.featured_image.as_deref()),
            gallery_images: gallery_urls(base_url, tour.gallery_images.as_ref()),
            price: tour.price,
            currency: tour.currency.clone(),
            discount_price: tour.discount_price,
            has_discount: tour.discount_price.is_some_and(|p| p > 0.0),
            duration: TourDuration {
                days: tour.duration_days,
                nights: tour.duration_nights,
                formatted: format!(
                    "{} Days / {} Nights",
                    tour.duration_days, tour.duration_nights
                ),
            },
            dates: TourDates {
                start_date: tour.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
                end_date: tour.end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            },
            difficulty_level: tour.difficulty_level.clone(),
            group_size: TourGroupSize {
                min: tour.min_group_size,
                max: tour.max_group_size,
            },
            tour_type: tour.tour_type.clone(),
            inclusions: array_or_empty(tour.inclusions.as_ref()),
            exclusions: array_or_empty(tour.exclusions.as_ref()),
            accommodation_details: array_or_empty(tour.accommodation_details.as_ref()),
            meal_plan: array_or_empty(tour.meal_plan.as_ref()),
            itinerary: array_or_empty(tour.itinerary.as_ref()),
            guide: TourGuide {
                included: tour.guide_included,
                language: tour.guide_language.clone(),
            },
            porter_included: tour.porter_included,
            requirements: tour.requirements.clone(),
            what_to_bring: tour.what_to_bring.clone(),
            status: TourStatus {
                is_active: tour.is_active,
                is_featured: tour.is_featured,
                is_popular: tour.is_popular,
            },
            booking: TourBooking {
                available_slots: tour.available_slots,
                instant_booking: tour.instant_booking,
            },
            slug: tour.slug.clone(),
            meta_description: tour.meta_description.clone(),
            tags: array_or_empty(tour.tags.as_ref()),
            created_at: tour.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: tour.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Activity row shaped for API responses.
#[derive(Debug, Serialize)]
pub struct ActivityView {
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
    pub featured_image_url: Option<String>,
    pub gallery_images: Option<Value>,
    pub gallery_images_urls: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub season: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActivityView {
    pub fn new(activity: &Activity, base_url: &str) -> Self {
        Self {
            id: activity.id,
            title: activity.title.clone(),
            location: activity.location.clone(),
            price: activity.price,
            currency: activity.currency.clone(),
            duration: activity.duration.clone(),
            difficulty: activity.difficulty.clone(),
            category: activity.category.clone(),
            min_age: activity.min_age,
            max_participants: activity.max_participants,
            description: activity.description.clone(),
            inclusions: activity.inclusions.clone(),
            requirements: activity.requirements.clone(),
            featured_image: activity.featured_image.clone(),
            featured_image_url: optional_url(base_url, activity.featured_image.as_deref()),
            gallery_images: activity.gallery_images.clone(),
            gallery_images_urls: gallery_urls(base_url, activity.gallery_images.as_ref()),
            is_featured: activity.is_featured,
            is_active: activity.is_active,
            season: activity.season.clone(),
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

/// Blog row shaped for API responses. Keeps the raw `image` path alongside
/// the expanded `image_url`.
#[derive(Debug, Serialize)]
pub struct BlogView {
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub content: Option<Value>,
    pub conclusion: Option<String>,
    pub slug: String,
    pub image: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BlogView {
    pub fn new(blog: &Blog, base_url: &str) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            subtitle: blog.subtitle.clone(),
            description: blog.description.clone(),
            excerpt: blog.excerpt.clone(),
            author: blog.author.clone(),
            content: blog.content.clone(),
            conclusion: blog.conclusion.clone(),
            slug: blog.slug.clone(),
            image: blog.image.clone(),
            image_url: optional_url(base_url, blog.image.as_deref()),
            is_active: blog.is_active,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// Review row for the admin listing: includes moderation `status`.
#[derive(Debug, Serialize)]
pub struct ReviewAdminView {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub review: String,
    pub rating: f64,
    pub status: bool,
    /// Title of the referenced trek, if it still exists.
    pub trek: Option<String>,
    pub created_at: String,
}

impl ReviewAdminView {
    pub fn new(row: &ReviewWithTrek) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            review: row.review.clone(),
            rating: row.rating,
            status: row.status,
            trek: row.trek_title.clone(),
            created_at: row.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Review row for public listings: approved entries only, no status field.
#[derive(Debug, Serialize)]
pub struct ReviewPublicView {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub review: String,
    pub rating: f64,
    pub trek: Option<String>,
    pub created_at: String,
}

impl ReviewPublicView {
    pub fn new(row: &ReviewWithTrek) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            review: row.review.clone(),
            rating: row.rating,
            trek: row.trek_title.clone(),
            created_at: row.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
