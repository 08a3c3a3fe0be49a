//! Handlers for the `/reviews` resource.
//!
//! Submission is public JSON and rate limited per email (rolling hour). The
//! moderation endpoints (full list, approve, delete) are admin-only; the
//! publishable/latest/stats endpoints feed the public site.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use trailhead_core::error::CoreError;
use trailhead_core::pagination::{clamp_page, clamp_per_page, DEFAULT_PER_PAGE};
use trailhead_core::reviews::{DEFAULT_PUBLISHABLE_PER_PAGE, SUBMISSION_WINDOW_SECS, THROTTLE_MESSAGE};
use trailhead_core::types::DbId;
use trailhead_db::repositories::ReviewRepo;

use crate::error::{AppError, AppResult};
use crate::forms::review::{parse_submission, ReviewSubmission};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, MessageResponse, PagedResponse};
use crate::state::AppState;
use crate::views::{ReviewAdminView, ReviewPublicView};

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for the paginated review listings.
#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Payload for `GET /reviews/stats`.
#[derive(Debug, Serialize)]
pub struct ReviewStats {
    pub positive_reviews: i64,
    pub negative_reviews: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/reviews (public)
///
/// Submit a review. At most one submission per email per rolling hour; the
/// throttle check is a point-in-time query, not atomic with the insert.
/// A configured mailer is notified on a detached task.
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<ReviewSubmission>,
) -> AppResult<impl IntoResponse> {
    let record = parse_submission(payload)?;

    if ReviewRepo::has_recent_submission(&state.pool, &record.email, SUBMISSION_WINDOW_SECS).await? {
        return Err(AppError::Core(CoreError::RateLimited(
            THROTTLE_MESSAGE.to_string(),
        )));
    }

    let review = ReviewRepo::create(&state.pool, &record).await?;

    tracing::info!(review_id = review.id, "Review submitted");

    if let Some(mailer) = state.mailer.clone() {
        tokio::spawn(async move {
            if let Err(err) = mailer.notify_review_submitted(&review).await {
                tracing::warn!(error = %err, review_id = review.id, "Review notification failed");
            }
        });
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Review created successfully")),
    ))
}

/// GET /api/reviews (admin)
///
/// All reviews including pending ones, each with the referenced trek's title.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(query.page);
    let per_page = clamp_per_page(query.per_page, DEFAULT_PER_PAGE);

    let reviews = ReviewRepo::list(&state.pool, page, per_page).await?;
    if reviews.items.is_empty() {
        return Err(AppError::NotFound("No reviews found".into()));
    }

    let views: Vec<ReviewAdminView> = reviews.items.iter().map(ReviewAdminView::new).collect();

    Ok(Json(PagedResponse::from_parts(
        views,
        reviews.meta,
        "Reviews fetched successfully",
    )))
}

/// GET /api/reviews/publishable (public)
///
/// Approved reviews, newest first, default page size 8.
pub async fn publishable(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(query.page);
    let per_page = clamp_per_page(query.per_page, DEFAULT_PUBLISHABLE_PER_PAGE);

    let reviews = ReviewRepo::list_publishable(&state.pool, page, per_page).await?;
    if reviews.items.is_empty() {
        return Err(AppError::NotFound("No publishable reviews found".into()));
    }

    let views: Vec<ReviewPublicView> = reviews.items.iter().map(ReviewPublicView::new).collect();

    Ok(Json(PagedResponse::from_parts(
        views,
        reviews.meta,
        "Publishable reviews fetched successfully",
    )))
}

/// GET /api/reviews/latest (public)
///
/// The four most recent approved reviews.
pub async fn latest(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let reviews = ReviewRepo::latest_approved(&state.pool).await?;
    if reviews.is_empty() {
        return Err(AppError::NotFound("No reviews found".into()));
    }

    let views: Vec<ReviewPublicView> = reviews.iter().map(ReviewPublicView::new).collect();

    Ok(Json(ApiResponse::new(views, "Reviews fetched successfully")))
}

/// GET /api/reviews/stats (public)
///
/// Positive (rating >= 4) and negative (rating < 3) counts; ratings in
/// between belong to neither bucket.
pub async fn stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let counts = ReviewRepo::rating_counts(&state.pool).await?;

    Ok(Json(ApiResponse::data(ReviewStats {
        positive_reviews: counts.positive,
        negative_reviews: counts.negative,
    })))
}

/// PUT /api/reviews/{id}/approve (admin)
///
/// Idempotent: approving an already-approved review succeeds.
pub async fn approve(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ReviewRepo::approve(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Review", id))?;

    tracing::info!(review_id = id, admin_id = admin.user_id, "Review approved");

    Ok(Json(MessageResponse::new("Review approved successfully")))
}

/// DELETE /api/reviews/{id} (admin)
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Review", id)));
    }

    tracing::info!(review_id = id, admin_id = admin.user_id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}
