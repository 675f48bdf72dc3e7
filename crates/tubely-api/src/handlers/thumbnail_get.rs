use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::path::VideoId;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tubely_core::AppError;

/// Serve a thumbnail held by the `memory` strategy. Public, like the asset URLs.
#[utoipa::path(
    get,
    path = "/api/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes with their stored content type"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "No thumbnail cached for this video", body = ErrorResponse)
    )
)]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    VideoId(video_id): VideoId,
) -> Result<Response, HttpAppError> {
    let thumbnail = state.thumbnails.get(video_id).await.ok_or_else(|| {
        AppError::ThumbnailNotFound(format!("No thumbnail cached for video {}", video_id))
    })?;

    Ok((
        [(header::CONTENT_TYPE, thumbnail.content_type)],
        thumbnail.data,
    )
        .into_response())
}
