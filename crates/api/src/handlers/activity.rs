//! Handlers for the `/activities` resource.
//!
//! Same shape as treks, with a wider upload policy: activities accept GIFs
//! and a larger size ceiling.

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
use trailhead_db::models::activity::ActivityListParams;
use trailhead_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;
use crate::uploads::{self, StagedUploads, ACTIVITY_MEDIA, ROLE_FEATURED, ROLE_GALLERY};
use crate::views::ActivityView;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /activities`.
#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    pub category: Option<String>,
    pub is_active: Option<String>,
    pub is_featured: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/activities
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ActivityListQuery>,
) -> AppResult<impl IntoResponse> {
    let params = ActivityListParams {
        category: query.category,
        is_active: query.is_active.as_deref().and_then(coerce::parse_bool),
        is_featured: query.is_featured.as_deref().and_then(coerce::parse_bool),
        page: clamp_page(query.page),
        per_page: clamp_per_page(query.per_page, DEFAULT_PER_PAGE),
    };

    let page = ActivityRepo::list(&state.pool, &params).await?;
    let views: Vec<ActivityView> = page
        .items
        .iter()
        .map(|activity| ActivityView::new(activity, &state.config.public_base_url))
        .collect();

    Ok(Json(PagedResponse::from_parts(
        views,
        page.meta,
        "Activities retrieved successfully",
    )))
}

/// GET /api/activities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Activity", id))?;

    Ok(Json(ApiResponse::new(
        ActivityView::new(&activity, &state.config.public_base_url),
        "Activity retrieved successfully",
    )))
}

/// POST /api/activities (admin)
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::activity::parse_create(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    if let Some(image) = &form.featured {
        let path = staged
            .store_one(&state.media, &ACTIVITY_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.featured_image = Some(path);
    }
    if let Some(gallery) = &form.gallery {
        let paths = staged
            .store_batch(&state.media, &ACTIVITY_MEDIA, ROLE_GALLERY, gallery)
            .await?;
        record.gallery_images = Some(json!(paths));
    }

    let activity = staged.resolve(ActivityRepo::create(&state.pool, &record).await)?;

    tracing::info!(
        activity_id = activity.id,
        admin_id = admin.user_id,
        "Activity created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            ActivityView::new(&activity, &state.config.public_base_url),
            "Activity created successfully",
        )),
    ))
}

/// PUT /api/activities/{id} (admin)
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Activity", id))?;

    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::activity::parse_update(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    let mut replaced: Vec<String> = Vec::new();

    if let Some(image) = &form.featured {
        let path = staged
            .store_one(&state.media, &ACTIVITY_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.featured_image = Some(path);
        replaced.extend(existing.featured_image.clone());
    }
    if let Some(gallery) = &form.gallery {
        let paths = staged
            .store_batch(&state.media, &ACTIVITY_MEDIA, ROLE_GALLERY, gallery)
            .await?;
        record.gallery_images = Some(json!(paths));
        replaced.extend(uploads::stored_paths(existing.gallery_images.as_ref()));
    }

    let updated = staged.resolve(ActivityRepo::update(&state.pool, id, &record).await)?;
    let activity = updated.ok_or_else(|| CoreError::not_found("Activity", id))?;

    uploads::discard(&state.media, &replaced).await;

    tracing::info!(activity_id = id, admin_id = admin.user_id, "Activity updated");

    Ok(Json(ApiResponse::new(
        ActivityView::new(&activity, &state.config.public_base_url),
        "Activity updated successfully",
    )))
}

/// DELETE /api/activities/{id} (admin)
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Activity", id))?;

    if !ActivityRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Activity", id)));
    }

    let paths = uploads::referenced_paths(
        activity.featured_image.as_deref(),
        activity.gallery_images.as_ref(),
    );
    uploads::discard(&state.media, &paths).await;

    tracing::info!(activity_id = id, admin_id = admin.user_id, "Activity deleted");

    Ok(StatusCode::NO_CONTENT)
}
