//! HTTP-level integration tests for the blog endpoints.
//!
//! Blogs are publicly fetched by a slug derived from the title; admin
//! updates arrive as multipart POSTs to the numeric id.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_multipart_auth, MultipartForm, PNG_BYTES,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A multipart form with every required blog field plus the cover image.
fn blog_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .text("title", title)
        .text("description", "Field notes from the trail.")
        .text("author", "Asha")
        .file("image", "cover.png", PNG_BYTES)
}

async fn create_blog(
    pool: &PgPool,
    media: &std::path::Path,
    token: &str,
    form: MultipartForm,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone(), media).await;
    let response = post_multipart_auth(app, "/api/blogs", form, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Create returns 201 with the stored row and writes the cover to disk.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_blog(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");

    let json = create_blog(&pool, media.path(), &token, blog_form("Everest Diaries")).await;

    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Blog created successfully");
    assert_eq!(json["data"]["title"], "Everest Diaries");
    assert_eq!(json["data"]["slug"], "everest-diaries");

    let image = json["data"]["image"].as_str().unwrap();
    assert!(image.starts_with("blogs/"), "got path: {image}");
    assert!(media.path().join(image).exists());
    assert_eq!(
        json["data"]["image_url"],
        format!("http://localhost:3000/storage/{image}")
    );
}

/// The cover image is required at creation.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_image(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let form = MultipartForm::new()
        .text("title", "No Cover")
        .text("description", "Missing the image.");
    let response = post_multipart_auth(app, "/api/blogs", form, &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["image"][0], "The image field is required.");
}

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// Blogs are fetched by the slug of their title, case-insensitively.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_title_slug(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");
    create_blog(&pool, media.path(), &token, blog_form("Everest Diaries")).await;

    let app = common::build_test_app(pool.clone(), media.path()).await;
    let response = get(app, "/api/blogs/everest-diaries").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Blog fetched successfully");
    assert_eq!(json["data"]["title"], "Everest Diaries");

    let app = common::build_test_app(pool, media.path()).await;
    let response = get(app, "/api/blogs/EVEREST-DIARIES").await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// An unknown slug is a 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_slug(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/api/blogs/never-written").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Blog not found");
}

/// An empty collection is reported as a 404, not an empty page.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_list_is_not_found(pool: PgPool) {
    let media = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(pool, media.path()).await;

    let response = get(app, "/api/blogs").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No blogs found");
}

/// The list endpoint returns the standard paged envelope.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_blogs(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");
    create_blog(&pool, media.path(), &token, blog_form("First Post")).await;
    create_blog(&pool, media.path(), &token, blog_form("Second Post")).await;

    let app = common::build_test_app(pool, media.path()).await;
    let response = get(app, "/api/blogs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Blogs fetched successfully");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["total"], 2);
}

/// The total endpoint reports the row count.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_total_blogs(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");
    create_blog(&pool, media.path(), &token, blog_form("First Post")).await;
    create_blog(&pool, media.path(), &token, blog_form("Second Post")).await;

    let app = common::build_test_app(pool, media.path()).await;
    let response = get(app, "/api/blogs/total").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["total_blogs"], 2);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

/// Updates POST to the numeric id; the stored cover survives when no new
/// file arrives and is replaced (old file removed) when one does.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_blog(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");

    let created = create_blog(&pool, media.path(), &token, blog_form("Everest Diaries")).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let old_image = created["data"]["image"].as_str().unwrap().to_string();

    // Text-only update keeps the stored cover.
    let app = common::build_test_app(pool.clone(), media.path()).await;
    let form = MultipartForm::new().text("title", "Everest Diaries, Revised");
    let response = post_multipart_auth(app, &format!("/api/blogs/{id}"), form, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Blog updated successfully");
    assert_eq!(json["data"]["title"], "Everest Diaries, Revised");
    assert_eq!(json["data"]["image"], old_image.as_str());
    assert!(media.path().join(&old_image).exists());

    // A new cover replaces the old file on disk.
    let app = common::build_test_app(pool, media.path()).await;
    let form = MultipartForm::new().file("image", "new-cover.png", PNG_BYTES);
    let response = post_multipart_auth(app, &format!("/api/blogs/{id}"), form, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_image = json["data"]["image"].as_str().unwrap();
    assert_ne!(new_image, old_image);
    assert!(media.path().join(new_image).exists());
    assert!(!media.path().join(&old_image).exists());
}

/// Delete returns 204 and removes the cover file.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_blog(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let media = tempfile::tempdir().expect("tempdir");

    let created = create_blog(&pool, media.path(), &token, blog_form("Short Lived")).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let image = created["data"]["image"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone(), media.path()).await;
    let response = delete_auth(app, &format!("/api/blogs/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!media.path().join(&image).exists());

    let app = common::build_test_app(pool, media.path()).await;
    let response = get(app, "/api/blogs/short-lived").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
