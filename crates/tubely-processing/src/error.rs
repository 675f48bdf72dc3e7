use thiserror::Error;
use tubely_core::AppError;

/// Media processing errors
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),

    #[error("ffmpeg failed: {0}")]
    ProcessingFailed(String),

    #[error("Invalid tool path: {0}")]
    InvalidToolPath(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::ProbeFailed(msg) => AppError::ProbeFailed(msg),
            MediaError::ProcessingFailed(msg) => AppError::ProcessingFailed(msg),
            MediaError::InvalidToolPath(msg) => AppError::Internal(msg),
        }
    }
}
