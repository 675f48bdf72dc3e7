use crate::api_doc::ApiDoc;
use crate::auth::middleware::auth_middleware;
use crate::constants::{API_BASE, ASSETS_PATH, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::{Config, StorageBackend, ThumbnailStrategy};
use utoipa::OpenApi;

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth = from_fn_with_state(state.jwt.clone(), auth_middleware);

    // Auth wraps only the POST methods; the GET added afterwards stays public.
    let mut thumbnail_routes = post(handlers::thumbnail_upload::upload_thumbnail)
        .layer(DefaultBodyLimit::max(
            config
                .max_thumbnail_size_bytes
                .saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
        .layer(auth.clone());
    if config.thumbnail_strategy == ThumbnailStrategy::Memory {
        thumbnail_routes = thumbnail_routes.get(handlers::thumbnail_get::get_thumbnail);
    }

    let video_routes = post(handlers::video_upload::upload_video)
        .layer(DefaultBodyLimit::max(
            config
                .max_video_size_bytes
                .saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
        .layer(auth);

    let api_routes = Router::new()
        .route("/thumbnails/{video_id}", thumbnail_routes)
        .route("/videos/{video_id}", video_routes)
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(API_BASE, api_routes);

    if config.storage_backend == StorageBackend::Local {
        app = app.nest_service(ASSETS_PATH, ServeDir::new(&config.assets_root));
    }

    let app = app
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    tracing::info!(
        thumbnail_strategy = %config.thumbnail_strategy,
        storage_backend = %config.storage_backend,
        "Routes configured"
    );

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
