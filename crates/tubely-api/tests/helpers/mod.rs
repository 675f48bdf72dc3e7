//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in process: records live in `InMemoryVideoRepository`,
//! assets in a `TempDir` behind `LocalStorage`, and ffmpeg is replaced by
//! `FakeMediaTool`. Run with `cargo test -p tubely-api`.

#![allow(dead_code)]

pub mod fixtures;
pub mod media;

use axum_test::TestServer;
use media::FakeMediaTool;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::services::ThumbnailCache;
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::{Config, VideoRecord};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_storage::LocalStorage;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret";
pub const PUBLIC_BASE_URL: &str = "http://tubely.test";

/// Test application: server plus handles on every collaborator.
pub struct TestApp {
    pub server: TestServer,
    pub videos: InMemoryVideoRepository,
    pub media: Arc<FakeMediaTool>,
    pub jwt: Arc<JwtService>,
    pub thumbnails: ThumbnailCache,
    pub assets_dir: TempDir,
    pub spool_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a video record owned by `user_id`.
    pub async fn create_video(&self, user_id: Uuid) -> VideoRecord {
        self.videos
            .create_video(&VideoRecord::new(user_id, "Boots", "A video about boots"))
            .await
            .unwrap()
    }

    pub async fn stored_video(&self, id: Uuid) -> VideoRecord {
        self.videos.get_video(id).await.unwrap().unwrap()
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.jwt
            .issue_token(user_id, chrono::Duration::hours(1))
            .unwrap()
    }

    pub fn bearer(&self, user_id: Uuid) -> String {
        format!("Bearer {}", self.token_for(user_id))
    }

    /// Files left in the upload spool directory.
    pub fn spooled_files(&self) -> Vec<String> {
        file_names(self.spool_dir.path())
    }

    /// Relative paths of every file under the asset root.
    pub fn stored_assets(&self) -> Vec<String> {
        fn walk(dir: &std::path::Path, root: &std::path::Path, out: &mut Vec<String>) {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    walk(&path, root, out);
                } else {
                    let relative = path.strip_prefix(root).unwrap();
                    out.push(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }
        let mut out = Vec::new();
        walk(self.assets_dir.path(), self.assets_dir.path(), &mut out);
        out.sort();
        out
    }
}

/// Names of the files currently in `dir`.
fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

pub fn test_config(
    assets_dir: &TempDir,
    spool_dir: &TempDir,
    overrides: &[(&str, &str)],
) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        ("PUBLIC_BASE_URL".to_string(), PUBLIC_BASE_URL.to_string()),
        (
            "ASSETS_ROOT".to_string(),
            assets_dir.path().to_string_lossy().to_string(),
        ),
        (
            "UPLOAD_TEMP_DIR".to_string(),
            spool_dir.path().to_string_lossy().to_string(),
        ),
        ("MAX_THUMBNAIL_SIZE_MB".to_string(), "1".to_string()),
        ("MAX_VIDEO_SIZE_MB".to_string(), "2".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    config.validate().unwrap();
    config
}

/// App with the default (`store`) thumbnail strategy and a landscape fake media tool.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[], FakeMediaTool::landscape()).await
}

pub async fn setup_test_app_with(overrides: &[(&str, &str)], media: FakeMediaTool) -> TestApp {
    let assets_dir = TempDir::new().unwrap();
    let spool_dir = TempDir::new().unwrap();
    let config = test_config(&assets_dir, &spool_dir, overrides);

    let videos = InMemoryVideoRepository::new();
    let storage = LocalStorage::new(
        config.assets_root.clone(),
        config.local_storage_base_url.clone(),
    )
    .await
    .unwrap();
    let media = Arc::new(media);
    let jwt = Arc::new(JwtService::new(&config.jwt_secret));
    let thumbnails = ThumbnailCache::new();

    let state = Arc::new(AppState {
        config: config.clone(),
        videos: Arc::new(videos.clone()),
        storage: Arc::new(storage),
        media: media.clone(),
        jwt: jwt.clone(),
        thumbnails: thumbnails.clone(),
    });

    let router = routes::setup_routes(&config, state).unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        videos,
        media,
        jwt,
        thumbnails,
        assets_dir,
        spool_dir,
    }
}
