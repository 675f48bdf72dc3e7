//! Error types module
//!
//! All request failures are unified under `AppError`. Each variant carries the
//! detailed cause for logging; the client only ever sees the fixed message
//! returned by `ErrorMetadata::client_message`.
//!
//! The `Database` variant wraps `sqlx::Error` when the `sqlx` feature is on and
//! a plain message otherwise.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed requests
    Debug,
    /// Warning level - for client mistakes worth noticing (bad media, wrong owner)
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_ID")
    fn error_code(&self) -> &'static str;

    /// Client-facing message. Never includes the underlying cause.
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid video id: {0}")]
    InvalidId(String),

    #[error("Missing bearer token: {0}")]
    AuthMissing(String),

    #[error("Invalid bearer token: {0}")]
    AuthInvalid(String),

    #[error("Caller does not own the video: {0}")]
    Forbidden(String),

    #[error("Video not found: {0}")]
    NotFound(String),

    #[error("Unreadable upload: {0}")]
    BadUpload(String),

    #[error("Unsupported content type: {0}")]
    InvalidContentType(String),

    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    #[error("Thumbnail not found: {0}")]
    ThumbnailNotFound(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidId(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, client_message, log_level).
///
/// `Forbidden` keeps 401 and `NotFound` keeps 400; existing clients depend on both.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::InvalidId(_) => (400, "INVALID_ID", "Invalid ID", LogLevel::Debug),
        AppError::AuthMissing(_) => (401, "AUTH_MISSING", "Couldn't find JWT", LogLevel::Debug),
        AppError::AuthInvalid(_) => (
            401,
            "AUTH_INVALID",
            "Couldn't validate JWT",
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (401, "FORBIDDEN", "Unauthorized", LogLevel::Warn),
        AppError::NotFound(_) => (400, "NOT_FOUND", "Couldn't find video", LogLevel::Debug),
        AppError::BadUpload(_) => (
            400,
            "BAD_UPLOAD",
            "Unable to parse form file",
            LogLevel::Debug,
        ),
        AppError::InvalidContentType(_) => (
            400,
            "INVALID_CONTENT_TYPE",
            "Invalid file type",
            LogLevel::Debug,
        ),
        AppError::ProbeFailed(_) => (
            400,
            "PROBE_FAILED",
            "Unable to get aspect ratio",
            LogLevel::Warn,
        ),
        AppError::ProcessingFailed(_) => (
            500,
            "PROCESSING_FAILED",
            "Error processing video",
            LogLevel::Error,
        ),
        AppError::StorageWriteFailed(_) => (
            500,
            "STORAGE_WRITE_FAILED",
            "Couldn't store asset",
            LogLevel::Error,
        ),
        AppError::ThumbnailNotFound(_) => (
            404,
            "THUMBNAIL_NOT_FOUND",
            "Thumbnail not found",
            LogLevel::Debug,
        ),
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            "Couldn't update video",
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            "Internal server error",
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name used in structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidId(_) => "InvalidId",
            AppError::AuthMissing(_) => "AuthMissing",
            AppError::AuthInvalid(_) => "AuthInvalid",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::BadUpload(_) => "BadUpload",
            AppError::InvalidContentType(_) => "InvalidContentType",
            AppError::ProbeFailed(_) => "ProbeFailed",
            AppError::ProcessingFailed(_) => "ProcessingFailed",
            AppError::StorageWriteFailed(_) => "StorageWriteFailed",
            AppError::ThumbnailNotFound(_) => "ThumbnailNotFound",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> String {
        app_error_static_metadata(self).2.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}
