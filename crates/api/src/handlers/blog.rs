//! Handlers for the `/blogs` resource.
//!
//! Blogs are fetched publicly by a slug derived from the title (lowercased,
//! spaces as dashes). The single cover image is required at creation;
//! updates arrive as `POST /blogs/{id}` for multipart-form compatibility.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use trailhead_core::error::CoreError;
use trailhead_core::pagination::{clamp_page, clamp_per_page, DEFAULT_PER_PAGE};
use trailhead_core::types::DbId;
use trailhead_db::repositories::BlogRepo;

use crate::error::{AppError, AppResult};
use crate::forms;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;
use crate::uploads::{self, StagedUploads, BLOG_MEDIA, ROLE_FEATURED};
use crate::views::BlogView;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /blogs`.
#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Response for `GET /blogs/total`.
#[derive(Debug, Serialize)]
pub struct TotalBlogsResponse {
    pub success: bool,
    pub total_blogs: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/blogs
///
/// Paginated blog list. An empty page is a 404, matching the site's
/// "nothing to show" handling.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = clamp_page(query.page);
    let per_page = clamp_per_page(query.per_page, DEFAULT_PER_PAGE);

    let blogs = BlogRepo::list(&state.pool, page, per_page).await?;
    if blogs.items.is_empty() {
        return Err(AppError::NotFound("No blogs found".into()));
    }

    let views: Vec<BlogView> = blogs
        .items
        .iter()
        .map(|blog| BlogView::new(blog, &state.config.public_base_url))
        .collect();

    Ok(Json(PagedResponse::from_parts(
        views,
        blogs.meta,
        "Blogs fetched successfully",
    )))
}

/// GET /api/blogs/{slug}
///
/// Look up a blog by its title slug, matched case-insensitively.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let blog = BlogRepo::find_by_title_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", &slug))?;

    Ok(Json(ApiResponse::new(
        BlogView::new(&blog, &state.config.public_base_url),
        "Blog fetched successfully",
    )))
}

/// GET /api/blogs/total
pub async fn total(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let total_blogs = BlogRepo::count(&state.pool).await?;
    Ok(Json(TotalBlogsResponse {
        success: true,
        total_blogs,
    }))
}

/// POST /api/blogs (admin)
///
/// Create a blog. The cover image is required; a blank slug is derived from
/// the title.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::blog::parse_create(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    let path = staged
        .store_one(&state.media, &BLOG_MEDIA, ROLE_FEATURED, &form.image)
        .await?;
    record.image = Some(path);

    let blog = staged.resolve(BlogRepo::create(&state.pool, &record).await)?;

    tracing::info!(blog_id = blog.id, admin_id = admin.user_id, "Blog created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            BlogView::new(&blog, &state.config.public_base_url),
            "Blog created successfully",
        )),
    ))
}

/// POST /api/blogs/{id} (admin)
///
/// Partial update. A supplied image replaces (and afterwards deletes) the
/// stored one.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id))?;

    let (fields, files) = forms::collect(multipart).await?;
    let form = forms::blog::parse_update(&fields, &files)?;
    let mut record = form.record;

    let mut staged = StagedUploads::new();
    let mut replaced: Vec<String> = Vec::new();

    if let Some(image) = &form.image {
        let path = staged
            .store_one(&state.media, &BLOG_MEDIA, ROLE_FEATURED, image)
            .await?;
        record.image = Some(path);
        replaced.extend(existing.image.clone());
    }

    let updated = staged.resolve(BlogRepo::update(&state.pool, id, &record).await)?;
    let blog = updated.ok_or_else(|| CoreError::not_found("Blog", id))?;

    uploads::discard(&state.media, &replaced).await;

    tracing::info!(blog_id = id, admin_id = admin.user_id, "Blog updated");

    Ok(Json(ApiResponse::new(
        BlogView::new(&blog, &state.config.public_base_url),
        "Blog updated successfully",
    )))
}

/// DELETE /api/blogs/{id} (admin)
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let blog = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog", id))?;

    if !BlogRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Blog", id)));
    }

    if let Some(image) = &blog.image {
        uploads::discard(&state.media, std::slice::from_ref(image)).await;
    }

    tracing::info!(blog_id = id, admin_id = admin.user_id, "Blog deleted");

    Ok(StatusCode::NO_CONTENT)
}
