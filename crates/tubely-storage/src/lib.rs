//! Tubely Storage Library
//!
//! Storage abstraction and the two backends an asset can land in: the local
//! filesystem and S3 (optionally fronted by a CDN distribution).
//!
//! # Storage key format
//!
//! - **Videos**: `{landscape|portrait|other}/{token}.mp4`, where `token` is 32
//!   random bytes in unpadded URL-safe base64.
//! - **Thumbnails**: `{video_id}.{ext}`.
//!
//! Keys must not contain `..` or a leading `/`. Key generation lives in the
//! `keys` module so every backend sees the same layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
