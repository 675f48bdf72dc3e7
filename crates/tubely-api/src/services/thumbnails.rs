use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub data: Bytes,
    pub content_type: String,
}

/// Process-wide thumbnail store for the `memory` strategy.
///
/// Empty at startup and never persisted; a restart drops every entry.
#[derive(Clone, Default)]
pub struct ThumbnailCache {
    inner: Arc<Mutex<HashMap<Uuid, Thumbnail>>>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the thumbnail for `video_id`, replacing any previous one.
    pub async fn insert(&self, video_id: Uuid, thumbnail: Thumbnail) {
        self.inner.lock().await.insert(video_id, thumbnail);
    }

    pub async fn get(&self, video_id: Uuid) -> Option<Thumbnail> {
        self.inner.lock().await.get(&video_id).cloned()
    }
}
