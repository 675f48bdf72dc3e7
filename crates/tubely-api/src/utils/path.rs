use crate::error::HttpAppError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tubely_core::AppError;
use uuid::Uuid;

/// The `{video_id}` path segment, parsed as a UUID.
///
/// Rejects with `InvalidId` instead of axum's plain-text path rejection so the
/// body stays `{"error": ...}`.
#[derive(Debug, Clone, Copy)]
pub struct VideoId(pub Uuid);

impl<S> FromRequestParts<S> for VideoId
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| HttpAppError(AppError::InvalidId(e.to_string())))?;

        Uuid::parse_str(&raw)
            .map(VideoId)
            .map_err(|e| HttpAppError(AppError::InvalidId(format!("{}: {}", raw, e))))
    }
}
