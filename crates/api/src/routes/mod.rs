pub mod activity;
pub mod auth;
pub mod blog;
pub mod health;
pub mod review;
pub mod tour;
pub mod trek;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/logout                 logout (requires auth)
/// /auth/me                     current user (requires auth)
///
/// /treks                       list (public), create (admin)
/// /treks/{id}                  get, update, delete
///
/// /tours                       list (public), create (admin)
/// /tours/featured              featured showcase (public)
/// /tours/popular               popular showcase (public)
/// /tours/{id}                  get, update, delete
///
/// /activities                  list (public), create (admin)
/// /activities/{id}             get, update, delete
///
/// /blogs                       list (public), create (admin)
/// /blogs/total                 total count (public)
/// /blogs/{slug}                get by slug (public), update/delete by id (admin)
///
/// /reviews                     submit (public POST), moderation list (admin GET)
/// /reviews/publishable         approved reviews (public)
/// /reviews/latest              newest four approved (public)
/// /reviews/stats               positive/negative counts (public)
/// /reviews/{id}/approve        approve (admin PUT)
/// /reviews/{id}                delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login, logout, current user).
        .nest("/auth", auth::router())
        // Catalogue resources.
        .nest("/treks", trek::router())
        .nest("/tours", tour::router())
        .nest("/activities", activity::router())
        // Editorial content.
        .nest("/blogs", blog::router())
        // Visitor reviews and moderation.
        .nest("/reviews", review::router())
}
