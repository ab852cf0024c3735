//! HTTP backend acknowledging evidence uploads
//!
//! Every handler is stateless: uploaded files live in the request's own
//! buffers and are dropped once the response is produced.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod routes;
mod schema;

pub use config::ServerConfig;
use routes::{
    health_handler, submit_handler, template_handler, upload_excel_handler, upload_images_handler,
};

/// Build the application router
pub fn router(config: &ServerConfig) -> Result<Router> {
    let origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("Invalid CORS origin {}", config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let uploads = DefaultBodyLimit::max(config.upload_limit_bytes);

    Ok(Router::new()
        .route("/health", get(health_handler))
        .route("/api/template", get(template_handler))
        .route(
            "/api/upload-excel",
            post(upload_excel_handler).layer(uploads),
        )
        .route(
            "/api/upload-images",
            post(upload_images_handler).layer(uploads),
        )
        .route(
            "/api/submit",
            post(submit_handler).layer(DefaultBodyLimit::max(config.json_limit_bytes)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    info!("Starting server...");
    let app = router(&config)?;

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Evidence server listening on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Serve the router on an ephemeral local port and return its base URL
#[cfg(test)]
pub(crate) async fn spawn_test_server() -> String {
    let app = router(&ServerConfig::default()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}
