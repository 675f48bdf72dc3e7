use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::fetch_owned_video;
use crate::state::AppState;
use crate::utils::path::VideoId;
use crate::utils::upload::{accept_multipart, spool_form_file};
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use std::sync::Arc;
use tubely_core::constants::{VIDEO_CONTENT_TYPE, VIDEO_FIELD};
use tubely_core::VideoRecord;
use tubely_processing::{normalize_for_fast_start, AspectRatio};
use tubely_storage::keys::video_key;

/// Upload an MP4 for a video the caller owns.
///
/// The upload is spooled to a temp file, probed for its aspect ratio, remuxed
/// for fast start and stored under `<landscape|portrait|other>/<token>.mp4`.
/// Both temp files are removed when the request ends, whatever the outcome.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video attached to the record", body = VideoRecord),
        (status = 400, description = "Invalid ID, unknown video, unusable upload or unreadable media", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or caller is not the owner", body = ErrorResponse),
        (status = 500, description = "Processing or storage failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(
        user_id = %auth.user_id,
        video_id = %video_id.0,
        operation = "upload_video"
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    video_id: VideoId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let VideoId(video_id) = video_id;
    let mut video = fetch_owned_video(state.videos.as_ref(), video_id, auth.user_id).await?;

    let upload = spool_form_file(
        accept_multipart(multipart)?,
        VIDEO_FIELD,
        state.config.max_video_size_bytes,
        &[VIDEO_CONTENT_TYPE],
        &state.config.upload_temp_dir,
    )
    .await?;

    let streams = state.media.probe(upload.path()).await?;
    let aspect = AspectRatio::from_streams(&streams)?;

    let processed = normalize_for_fast_start(state.media.as_ref(), upload.path()).await?;

    let key = video_key(aspect.key_prefix());
    let url = state
        .storage
        .upload_file(&key, &processed, VIDEO_CONTENT_TYPE)
        .await?;

    video.video_url = Some(url);
    let video = state.videos.update_video(&video).await?;

    tracing::info!(
        size_bytes = upload.size,
        aspect_ratio = %aspect,
        storage_key = %key,
        "Video uploaded"
    );

    Ok(Json(video))
}
