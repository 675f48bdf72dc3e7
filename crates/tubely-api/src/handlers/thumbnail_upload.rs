use crate::auth::AuthUser;
use crate::constants::thumbnail_url;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::{fetch_owned_video, Thumbnail};
use crate::state::AppState;
use crate::utils::path::VideoId;
use crate::utils::upload::{accept_multipart, extension_for_content_type, read_form_file};
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use std::sync::Arc;
use tubely_core::constants::THUMBNAIL_FIELD;
use tubely_core::{ThumbnailStrategy, VideoRecord};
use tubely_storage::keys::thumbnail_key;

#[utoipa::path(
    post,
    path = "/api/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail attached to the video", body = VideoRecord),
        (status = 400, description = "Invalid ID, unknown video or unusable upload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or caller is not the owner", body = ErrorResponse),
        (status = 500, description = "Asset could not be stored", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(
        user_id = %auth.user_id,
        video_id = %video_id.0,
        operation = "upload_thumbnail"
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    video_id: VideoId,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let VideoId(video_id) = video_id;
    let mut video = fetch_owned_video(state.videos.as_ref(), video_id, auth.user_id).await?;

    let upload = read_form_file(
        accept_multipart(multipart)?,
        THUMBNAIL_FIELD,
        state.config.max_thumbnail_size_bytes,
        &state.config.thumbnail_allowed_content_types,
    )
    .await?;
    let size = upload.bytes.len();

    let url = match state.config.thumbnail_strategy {
        ThumbnailStrategy::Store => {
            let extension = extension_for_content_type(&upload.content_type)?;
            let key = thumbnail_key(video_id, extension);
            state
                .storage
                .upload_with_key(&key, upload.bytes, &upload.content_type)
                .await?
        }
        ThumbnailStrategy::Memory => {
            state
                .thumbnails
                .insert(
                    video_id,
                    Thumbnail {
                        data: upload.bytes,
                        content_type: upload.content_type,
                    },
                )
                .await;
            thumbnail_url(&state.config.public_base_url, video_id)
        }
    };

    video.thumbnail_url = Some(url);
    let video = state.videos.update_video(&video).await?;

    tracing::info!(
        size_bytes = size,
        strategy = %state.config.thumbnail_strategy,
        thumbnail_url = ?video.thumbnail_url,
        "Thumbnail uploaded"
    );

    Ok(Json(video))
}
