use tubely_core::{AppError, VideoRecord};
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Load a video and make sure `user_id` owns it.
///
/// Runs before any upload byte is read or any asset is written.
pub async fn fetch_owned_video(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<VideoRecord, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if !video.is_owned_by(user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %user_id,
            owner_id = %video.user_id,
            "Upload attempted by non-owner"
        );
        return Err(AppError::Forbidden(format!(
            "User {} does not own video {}",
            user_id, video_id
        )));
    }

    Ok(video)
}
