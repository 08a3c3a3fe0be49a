use std::sync::Arc;

use trailhead_media::MediaStore;

use crate::config::ServerConfig;
use crate::notifications::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: trailhead_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Filesystem store for uploaded images.
    pub media: MediaStore,
    /// Outbound email delivery; `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
