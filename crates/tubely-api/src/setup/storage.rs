//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::{Config, StorageBackend};
use tubely_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    match storage.backend_type() {
        StorageBackend::Local => tracing::info!(
            backend = %StorageBackend::Local,
            root = %config.assets_root.display(),
            base_url = %config.local_storage_base_url,
            "Storage initialized"
        ),
        StorageBackend::S3 => tracing::info!(
            backend = %StorageBackend::S3,
            bucket = ?config.s3_bucket,
            region = ?config.s3_region,
            cdn = ?config.s3_cf_distribution,
            "Storage initialized"
        ),
    }

    Ok(storage)
}
