//! Video repositories
//!
//! `VideoRepository` is the seam the API works against. `PgVideoRepository`
//! backs it with Postgres; `InMemoryVideoRepository` keeps records in process
//! memory for development without a database and for tests.

pub mod memory;
pub mod video;

pub use memory::InMemoryVideoRepository;
pub use video::PgVideoRepository;

use async_trait::async_trait;
use tubely_core::{AppError, VideoRecord};
use uuid::Uuid;

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Fetch a record by id. `Ok(None)` when it does not exist.
    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    /// Persist the mutable fields of `video` (title, description, asset URLs).
    ///
    /// The owner is never rewritten. Fails with `NotFound` if the record is gone.
    async fn update_video(&self, video: &VideoRecord) -> Result<VideoRecord, AppError>;

    /// Insert a new record.
    async fn create_video(&self, video: &VideoRecord) -> Result<VideoRecord, AppError>;
}
