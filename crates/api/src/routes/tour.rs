use axum::routing::get;
use axum::Router;

use crate::handlers::tour;
use crate::state::AppState;

/// Tour catalogue routes.
///
/// The `featured` and `popular` showcases are static segments, registered
/// alongside `/{id}`; the router matches them before the parameterised route.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (admin)
/// GET    /featured  -> featured
/// GET    /popular   -> popular
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update (admin)
/// DELETE /{id}      -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tour::list).post(tour::create))
        .route("/featured", get(tour::featured))
        .route("/popular", get(tour::popular))
        .route(
            "/{id}",
            get(tour::get_by_id).put(tour::update).delete(tour::delete),
        )
}
