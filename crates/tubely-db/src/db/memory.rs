use super::VideoRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::{AppError, VideoRecord};
use uuid::Uuid;

/// Video repository held in process memory. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, VideoRecord>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &VideoRecord) -> Result<VideoRecord, AppError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} disappeared", video.id)))?;

        stored.title = video.title.clone();
        stored.description = video.description.clone();
        stored.thumbnail_url = video.thumbnail_url.clone();
        stored.video_url = video.video_url.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn create_video(&self, video: &VideoRecord) -> Result<VideoRecord, AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::Internal(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }
}
