use super::VideoRepository;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::{AppError, VideoRecord};
use uuid::Uuid;

const VIDEO_COLUMNS: &str =
    "id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url";

/// Postgres-backed video repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        let video = sqlx::query_as::<Postgres, VideoRecord>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &VideoRecord) -> Result<VideoRecord, AppError> {
        let updated = sqlx::query_as::<Postgres, VideoRecord>(&format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Video {} disappeared", video.id)))
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    async fn create_video(&self, video: &VideoRecord) -> Result<VideoRecord, AppError> {
        let created = sqlx::query_as::<Postgres, VideoRecord>(&format!(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id, thumbnail_url, video_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(video.id)
        .bind(video.created_at)
        .bind(video.updated_at)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.user_id)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
