//! Configuration module
//!
//! Settings come from the process environment (after loading `.env` through
//! `dotenvy`). Missing optional values fall back to defaults; malformed or
//! inconsistent values fail `validate` so the server refuses to start.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::BYTES_PER_MB;
use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 8091;
const DB_MAX_CONNECTIONS: u32 = 5;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 10 * 1024;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Where uploaded thumbnails end up. One strategy per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailStrategy {
    /// Written through the configured storage backend.
    Store,
    /// Kept in process memory and served by the API.
    Memory,
}

impl FromStr for ThumbnailStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "store" | "storage" => Ok(ThumbnailStrategy::Store),
            "memory" => Ok(ThumbnailStrategy::Memory),
            _ => Err(anyhow::anyhow!("Invalid thumbnail strategy: {}", s)),
        }
    }
}

impl Display for ThumbnailStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ThumbnailStrategy::Store => write!(f, "store"),
            ThumbnailStrategy::Memory => write!(f, "memory"),
        }
    }
}

fn parse_number<T: FromStr>(value: Option<String>, name: &str, default: T) -> Result<T, anyhow::Error> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        None => Ok(default),
    }
}

fn megabytes_to_bytes(megabytes: usize, name: &str) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(BYTES_PER_MB)
        .ok_or_else(|| anyhow::anyhow!("{} is too large", name))
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub log_json: bool,
    pub cors_origins: Vec<String>,
    pub public_base_url: String,
    pub jwt_secret: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub assets_root: PathBuf,
    pub local_storage_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO, R2, ...)
    pub s3_cf_distribution: Option<String>,
    // Upload handling
    pub thumbnail_strategy: ThumbnailStrategy,
    pub thumbnail_allowed_content_types: Vec<String>,
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
    /// Directory video uploads are spooled to before processing.
    pub upload_temp_dir: PathBuf,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = parse_number(var("PORT"), "PORT", DEFAULT_PORT)?;

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => StorageBackend::Local,
        };

        let thumbnail_strategy = match var("THUMBNAIL_STRATEGY") {
            Some(s) => s.parse()?,
            None => ThumbnailStrategy::Store,
        };

        let thumbnail_allowed_content_types = var("THUMBNAIL_CONTENT_TYPES")
            .unwrap_or_else(|| "image/jpeg,image/png".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let max_thumbnail_size_bytes = megabytes_to_bytes(
            parse_number(var("MAX_THUMBNAIL_SIZE_MB"), "MAX_THUMBNAIL_SIZE_MB", MAX_THUMBNAIL_SIZE_MB)?,
            "MAX_THUMBNAIL_SIZE_MB",
        )?;
        let max_video_size_bytes = megabytes_to_bytes(
            parse_number(var("MAX_VIDEO_SIZE_MB"), "MAX_VIDEO_SIZE_MB", MAX_VIDEO_SIZE_MB)?,
            "MAX_VIDEO_SIZE_MB",
        )?;

        let public_base_url = var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", server_port));
        let local_storage_base_url = var("LOCAL_STORAGE_BASE_URL")
            .unwrap_or_else(|| format!("{}/assets", public_base_url.trim_end_matches('/')));

        Ok(Config {
            server_port,
            environment,
            log_json: var("LOG_FORMAT")
                .map(|f| f.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            cors_origins,
            public_base_url,
            jwt_secret: var("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            database_url: var("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            db_max_connections: parse_number(
                var("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                DB_MAX_CONNECTIONS,
            )?,
            storage_backend,
            assets_root: PathBuf::from(var("ASSETS_ROOT").unwrap_or_else(|| "./assets".to_string())),
            local_storage_base_url,
            s3_bucket: var("S3_BUCKET"),
            s3_region: var("S3_REGION").or_else(|| var("AWS_REGION")),
            s3_endpoint: var("S3_ENDPOINT"),
            s3_cf_distribution: var("S3_CF_DISTRIBUTION").or_else(|| var("S3_CF_DISTRO")),
            thumbnail_strategy,
            thumbnail_allowed_content_types,
            max_thumbnail_size_bytes,
            max_video_size_bytes,
            upload_temp_dir: var("UPLOAD_TEMP_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            ffmpeg_path: var("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: var("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.thumbnail_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "THUMBNAIL_CONTENT_TYPES must list at least one content type"
            ));
        }

        if self.max_thumbnail_size_bytes == 0 || self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.assets_root.as_os_str().is_empty() {
                    return Err(anyhow::anyhow!(
                        "ASSETS_ROOT must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
