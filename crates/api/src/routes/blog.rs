use axum::routing::get;
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Blog routes.
///
/// The parameterised segment is shared: GET treats it as a title slug while
/// POST and DELETE parse it as a numeric id (updates arrive as multipart
/// POSTs, one route slot per path in the router).
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (admin)
/// GET    /total   -> total
/// GET    /{slug}  -> get_by_slug
/// POST   /{slug}  -> update by id (admin)
/// DELETE /{slug}  -> delete by id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list).post(blog::create))
        .route("/total", get(blog::total))
        .route(
            "/{slug}",
            get(blog::get_by_slug).post(blog::update).delete(blog::delete),
        )
}
