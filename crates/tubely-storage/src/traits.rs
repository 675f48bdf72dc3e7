//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Every storage failure surfaces to the caller as a failed asset write.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::StorageWriteFailed(err.to_string())
    }
}

/// Storage abstraction trait
///
/// Handlers only talk to this trait, so the backend (local disk or S3) is a
/// deployment decision. Writes are single attempts: nothing is retried and a
/// failed write leaves no partial record behind in the video store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload in-memory data under `storage_key` and return its public URL.
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Upload the file at `path` under `storage_key` and return its public URL.
    ///
    /// The file is streamed from disk; large videos are never buffered in memory.
    async fn upload_file(
        &self,
        storage_key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Public URL under which `storage_key` is (or will be) reachable.
    fn public_url(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
