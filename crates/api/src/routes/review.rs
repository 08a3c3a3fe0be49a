use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Review submission and moderation routes.
///
/// ```text
/// POST   /              -> submit
/// GET    /              -> list (admin)
/// GET    /publishable   -> publishable
/// GET    /latest        -> latest
/// GET    /stats         -> stats
/// PUT    /{id}/approve  -> approve (admin)
/// DELETE /{id}          -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(review::list).post(review::submit))
        .route("/publishable", get(review::publishable))
        .route("/latest", get(review::latest))
        .route("/stats", get(review::stats))
        .route("/{id}/approve", put(review::approve))
        .route("/{id}", delete(review::delete))
}
