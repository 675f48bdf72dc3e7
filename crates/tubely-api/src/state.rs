//! Application state shared by every handler.

use crate::auth::JwtService;
use crate::services::ThumbnailCache;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::MediaTool;
use tubely_storage::Storage;

/// Everything is read-only after startup except the record store and the
/// thumbnail cache, which guard themselves.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub media: Arc<dyn MediaTool>,
    pub jwt: Arc<JwtService>,
    pub thumbnails: ThumbnailCache,
}
