//! Handlers for the `/tours` resource.
//!
//! The listing carries the richest filter set of the catalogue (flags, type,
//! difficulty, destination/title substrings, whitelisted sort). `/featured`
//! and `/popular` are fixed showcase queries for the landing page.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use trailhead_core::coerce;
use trailhead_core::error::CoreError;
use trailhead_core::pagination::{clamp_page, clamp_per_page, DEFAULT_PER_PAGE};
use trailhead_core::tours::{sort_column, sort_direction};
use trailhead_core::types::DbId;
use trailhead_db::models::tour::TourListParams;
use trailhead_db::repositories::TourRepo;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;
use crate::uploads::{self, StagedUploads, ROLE_FEATURED, ROLE_GALLERY, TOUR_MEDIA};
use crate::views::TourView;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /tours`.
#[derive(Debug, Deserialize)]
pub struct TourListQuery {
    pub is_active: Option<String>,
    pub is_featured: Option<String>,
    pub is_popular: Option<String>,
    pub tour_type: Option<String>,
    pub difficulty_level: Option<String>,
    /// Substring match on `destination`.
    pub destination: Option<String>,
    /// Substring match on `title`.
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tours
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TourListQuery>,
) -> AppResult<impl IntoResponse> {
    let params = TourListParams {
        is_active: query.is_active.as_deref().and_then(coerce::parse_bool),
        is_featured: query.is_featured.as_deref().and_then(coerce::parse_bool),
        is_popular: query.is_popular.as_deref().and_then(coerce::parse_bool),
        tour_type: query.tour_type,
        difficulty_level: query.difficulty_level,
        destination: query.destination,
        search: query.search,
        sort_by: sort_column(query.sort_by.as_deref()),
        sort_order: sort_direction(query.sort_order.as_deref()),
        page: clamp_page(query.page),
        per_page: clamp_per_page(query.per_page, DEFAULT_PER_PAGE),
    };

    let page = TourRepo::list(&state.pool, &params).await?;
    let views: Vec<TourView> = page
        .items
        .iter()
        .map(|tour| TourView::new(tour, &state.config.public_base_url))
        .collect();

    Ok(Json(PagedResponse::from_parts(
        views,
        page.meta,
        "Tours retrieved successfully",
    )))
}

/// GET /api/tours/featured
///
/// Active, featured tours, newest first, capped at the showcase limit.
pub async fn featured(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tours = TourRepo::featured(&state.pool).await?;
    let views: Vec<TourView> = tours
        .iter()
        .map(|tour| TourView::new(tour, &state.config.public_base_url))
        .collect();

    Ok(Json(ApiResponse::new(
        views,
        "Featured tours retrieved successfully",
    )))
}

/// GET /api/tours/popular
///
/// Active, popular tours, newest first, capped at the showcase limit.
pub async fn popular(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tours = TourRepo::popular(&state.pool).await?;
    let views: Vec<TourView> = tours
        .iter()
        .map(|tour| TourView::new(tour, &state.config.public_base_url))
        .collect();

    Ok(Json(ApiResponse::new(
        views,
        "Popular tours retrieved successfully",
    )))
}

/// GET /api/tours/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tour = TourRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;

    Ok(Json(ApiResponse::new(
        TourView::new(&tour, &state.config.public_base_url),
        "Tour retrieved successfully",
    )))
}

/// POST /api/tours (admin)
///
/// Create a tour. A blank slug is derived from the title; a duplicate slug
/// surfaces as a 409.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::tour::parse_create(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    if let Some(image) = &form.featured {
        let path = staged
            .store_one(&state.media, &TOUR_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.featured_image = Some(path);
    }
    if let Some(gallery) = &form.gallery {
        let paths = staged
            .store_batch(&state.media, &TOUR_MEDIA, ROLE_GALLERY, gallery)
            .await?;
        record.gallery_images = Some(json!(paths));
    }

    let tour = staged.resolve(TourRepo::create(&state.pool, &record).await)?;

    tracing::info!(tour_id = tour.id, admin_id = admin.user_id, "Tour created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            TourView::new(&tour, &state.config.public_base_url),
            "Tour created successfully",
        )),
    ))
}

/// PUT /api/tours/{id} (admin)
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = TourRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;

    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::tour::parse_update(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    let mut replaced: Vec<String> = Vec::new();

    if let Some(image) = &form.featured {
        let path = staged
            .store_one(&state.media, &TOUR_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.featured_image = Some(path);
        replaced.extend(existing.featured_image.clone());
    }
    if let Some(gallery) = &form.gallery {
        let paths = staged
            .store_batch(&state.media, &TOUR_MEDIA, ROLE_GALLERY, gallery)
            .await?;
        record.gallery_images = Some(json!(paths));
        replaced.extend(uploads::stored_paths(existing.gallery_images.as_ref()));
    }

    let updated = staged.resolve(TourRepo::update(&state.pool, id, &record).await)?;
    let tour = updated.ok_or_else(|| CoreError::not_found("Tour", id))?;

    uploads::discard(&state.media, &replaced).await;

    tracing::info!(tour_id = id, admin_id = admin.user_id, "Tour updated");

    Ok(Json(ApiResponse::new(
        TourView::new(&tour, &state.config.public_base_url),
        "Tour updated successfully",
    )))
}

/// DELETE /api/tours/{id} (admin)
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let tour = TourRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Tour", id))?;

    if !TourRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Tour", id)));
    }

    let paths = uploads::referenced_paths(
        tour.featured_image.as_deref(),
        tour.gallery_images.as_ref(),
    );
    uploads::discard(&state.media, &paths).await;

    tracing::info!(tour_id = id, admin_id = admin.user_id, "Tour deleted");

    Ok(StatusCode::NO_CONTENT)
}
