pub mod api_routes;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::service::relay_service::RelayService;
use api_routes::{chat_handler, upload_handler};

/// Builds the relay router: the two API relays, plus the compiled frontend
/// as fallback when a static directory is configured.
pub fn build_router(svc: RelayService, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .route("/api/chat", post(chat_handler))
        .route(
            "/api/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .with_state(svc);

    if let Some(dir) = &config.static_dir {
        let index = format!("{}/index.html", dir.trim_end_matches('/'));
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    if let Some(origin) = &config.cors_allowed_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin.clone())
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    app.layer(TraceLayer::new_for_http())
}
