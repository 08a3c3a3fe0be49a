//! Handlers for the `/treks` resource.
//!
//! Reads are public; mutations require the admin role and consume
//! `multipart/form-data`. New images are written to the media store before
//! the row is touched; replaced files are removed only after the row write
//! committed.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use trailhead_core::coerce;
use trailhead_core::error::CoreError;
use trailhead_core::pagination::{clamp_page, clamp_per_page, DEFAULT_PER_PAGE};
use trailhead_core::types::DbId;
use trailhead_db::models::trek::TrekListParams;
use trailhead_db::repositories::TrekRepo;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;
use crate::uploads::{self, StagedUploads, ROLE_FEATURED, ROLE_GALLERY, TREK_MEDIA};
use crate::views::TrekView;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /treks`.
///
/// `is_active` arrives as a string (`"1"`, `"true"`, ...) and is coerced;
/// unrecognized values leave the filter off.
#[derive(Debug, Deserialize)]
pub struct TrekListQuery {
    pub data_type: Option<String>,
    pub is_active: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/treks
///
/// List treks, newest first, with optional `data_type` / `is_active` filters.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<TrekListQuery>,
) -> AppResult<impl IntoResponse> {
    let params = TrekListParams {
        data_type: query.data_type,
        is_active: query.is_active.as_deref().and_then(coerce::parse_bool),
        page: clamp_page(query.page),
        per_page: clamp_per_page(query.per_page, DEFAULT_PER_PAGE),
    };

    let page = TrekRepo::list(&state.pool, &params).await?;
    let views: Vec<TrekView> = page
        .items
        .iter()
        .map(|trek| TrekView::new(trek, &state.config.public_base_url))
        .collect();

    Ok(Json(PagedResponse::from_parts(
        views,
        page.meta,
        "Treks retrieved successfully",
    )))
}

/// GET /api/treks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let trek = TrekRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Trek", id))?;

    Ok(Json(ApiResponse::new(
        TrekView::new(&trek, &state.config.public_base_url),
        "Trek retrieved successfully",
    )))
}

/// POST /api/treks (admin)
///
/// Create a trek from a multipart form with optional `featured_image` and
/// `gallery_images[]` uploads.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::trek::parse_create(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    if let Some(image) = &form.featured {
        let path = staged
            .store_one(&state.media, &TREK_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.featured_image = Some(path);
    }
    if let Some(gallery) = &form.gallery {
        let paths = staged
            .store_batch(&state.media, &TREK_MEDIA, ROLE_GALLERY, gallery)
            .await?;
        record.gallery_images = Some(json!(paths));
    }

    let trek = staged.resolve(TrekRepo::create(&state.pool, &record).await)?;

    tracing::info!(trek_id = trek.id, admin_id = admin.user_id, "Trek created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            TrekView::new(&trek, &state.config.public_base_url),
            "Trek created successfully",
        )),
    ))
}

/// PUT /api/treks/{id} (admin)
///
/// Partial update; only fields present in the form are touched. Supplying a
/// new featured image or gallery replaces (and afterwards deletes) the old
/// files.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = TrekRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Trek", id))?;

    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::trek::parse_update(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    let mut replaced: Vec<String> = Vec::new();

    if let Some(image) = &form.featured {
        let path = staged
            .store_one(&state.media, &TREK_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.featured_image = Some(path);
        replaced.extend(existing.featured_image.clone());
    }
    if let Some(gallery) = &form.gallery {
        let paths = staged
            .store_batch(&state.media, &TREK_MEDIA, ROLE_GALLERY, gallery)
            .await?;
        record.gallery_images = Some(json!(paths));
        replaced.extend(uploads::stored_paths(existing.gallery_images.as_ref()));
    }

    let updated = staged.resolve(TrekRepo::update(&state.pool, id, &record).await)?;
    let trek = updated.ok_or_else(|| CoreError::not_found("Trek", id))?;

    uploads::discard(&state.media, &replaced).await;

    tracing::info!(trek_id = id, admin_id = admin.user_id, "Trek updated");

    Ok(Json(ApiResponse::new(
        TrekView::new(&trek, &state.config.public_base_url),
        "Trek updated successfully",
    )))
}

/// DELETE /api/treks/{id} (admin)
///
/// Removes the row, then its stored images. Returns 204.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let trek = TrekRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Trek", id))?;

    if !TrekRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Trek", id)));
    }

    let paths = uploads::referenced_paths(
        trek.featured_image.as_deref(),
        trek.gallery_images.as_ref(),
    );
    uploads::discard(&state.media, &paths).await;

    tracing::info!(trek_id = id, admin_id = admin.user_id, "Trek deleted");

    Ok(StatusCode::NO_CONTENT)
}
