//! Application setup and initialization
//!
//! Everything `main` needs to go from a `Config` to a served router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtService;
use crate::services::ThumbnailCache;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::FfmpegTool;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_json);
    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    tokio::fs::create_dir_all(&config.upload_temp_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.upload_temp_dir.display()
            )
        })?;

    let videos = database::setup_video_repository(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let media = FfmpegTool::new(config.ffmpeg_path.clone(), config.ffprobe_path.clone())
        .context("Invalid FFMPEG_PATH or FFPROBE_PATH")?;

    let state = Arc::new(AppState {
        jwt: Arc::new(JwtService::new(&config.jwt_secret)),
        videos,
        storage,
        media: Arc::new(media),
        thumbnails: ThumbnailCache::new(),
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
