//! HTTP hosting surface
//!
//! Exposes the scan engine and the site's discovery documents:
//!
//! | Route | Response |
//! |-------|----------|
//! | `POST /api/scan` | JSON scan envelope |
//! | `GET /robots.txt` | `text/plain` |
//! | `GET /sitemap.xml` | `application/xml` |
//!
//! The router is public so integration tests can drive it without binding a
//! socket.

mod discovery;

pub use discovery::{robots_txt, sitemap_xml, PUBLIC_ORIGIN, SITEMAP_PATHS};

use crate::output::{ErrorEnvelope, ScanEnvelope};
use crate::scan::{ScanRequest, Scanner};
use crate::{ScanError, UrlError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared state injected into every handler
pub type AppState = Arc<Scanner>;

/// Builds the router
pub fn create_app(scanner: AppState) -> Router {
    Router::new()
        .route("/api/scan", post(scan_handler))
        .route("/robots.txt", get(robots_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .with_state(scanner)
}

/// Serves the router on `addr` until Ctrl-C
pub async fn serve(addr: SocketAddr, scanner: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_app(scanner))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

pub async fn scan_handler(
    State(scanner): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected scan body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, UrlError::Missing.to_string());
        }
    };

    match scanner.scan(&request).await {
        Ok(report) => (StatusCode::OK, Json(ScanEnvelope::new(&report))).into_response(),
        Err(e) => scan_error_response(&e),
    }
}

/// Maps a scan failure to its status and envelope
pub fn scan_error_response(error: &ScanError) -> Response {
    if error.is_user_error() {
        tracing::debug!("Invalid scan request: {}", error);
        return error_response(StatusCode::BAD_REQUEST, UrlError::Missing.to_string());
    }

    tracing::warn!("Scan failed: {}", error);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Scan failed: {}", error),
    )
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorEnvelope::new(message))).into_response()
}

pub async fn robots_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], robots_txt())
}

pub async fn sitemap_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], sitemap_xml())
}
