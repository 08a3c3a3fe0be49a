use axum::routing::get;
use axum::Router;

use crate::handlers::trek;
use crate::state::AppState;

/// Trek catalogue routes.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (admin)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trek::list).post(trek::create))
        .route(
            "/{id}",
            get(trek::get_by_id).put(trek::update).delete(trek::delete),
        )
}
