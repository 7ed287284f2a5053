//! # Portfolio Contact Backend
//!
//! Receives the contact dialog's submissions and forwards real ones to the site owner's inbox.
//!
//!
//!
//! # General Infrastructure
//! - Static pages are served elsewhere, this service only owns `POST /api/contact`
//! - Reverse proxy terminates TLS and forwards to the container
//! - Email leaves through Resend, the API key and recipient come from docker secrets
//!
//!
//!
//! # Preventing Spam
//!
//! **Goal**: Keep bot submissions out of the inbox without telling the bot it was caught.
//!
//! - Form renders hidden decoy inputs (`website`, `_honeypot`) that humans never see or tab into
//! - Frontend captures the render timestamp once, when the dialog mounts
//! - Frontend blocks its own submit if a decoy is filled or under 3 seconds passed
//! - On a local block, the frontend waits about a second and shows the normal success toast
//! - Otherwise, the frontend posts the fields plus `_honeypot_timestamp` and `_honeypot_field`
//! - Backend re-checks decoys and timing itself, the client verdict is never trusted
//! - Backend also rejects sessions older than an hour
//! - Any backend rejection still returns `200 {"success":true}`
//!
//!
//!
//! # Responses
//! - `200 {"success":true}`: delivered, or dropped as spam
//! - `400 {"error":"Missing required fields"}`
//! - `400 {"error":"Invalid email format"}`
//! - `413 {"error":"Payload too large"}`
//! - `500 {"error":"Email service not configured"}`
//! - `500 {"error":"Recipient email not configured"}`
//! - `500 {"error":"Failed to send email: ..."}`
//! - `500 {"error":"Internal server error: ..."}`
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! RUST_PORT=1111
//! RUST_LOG=info
//! CONTACT_FROM="Portfolio Contact <onboarding@resend.dev>"
//! HONEYPOT_REQUIRE_TIMESTAMP=false
//! ALLOWED_ORIGIN=https://example.com
//! ```
//!
//! Secrets, either as env vars or files.
//! ```sh
//! /run/secrets/RESEND_API_KEY
//! /run/secrets/CONTACT_EMAIL
//! ```
//!
//! Try it.
//! ```sh
//! cargo run -p contact-client -- http://localhost:1111/api/contact --name Jane --email jane@x.com --message hi --rendered-ms-ago 5000
//! ```
use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::post,
};

use serde_json::json;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod email;
pub mod error;
pub mod routes;
pub mod state;
pub mod template;
pub mod utils;

use config::Config;
use error::AppError;
use routes::contact_handler;
use state::State;

pub const CONTACT_ROUTE: &str = "/api/contact";

pub async fn start_server() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");
    let app = build_router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn build_router(state: Arc<State>) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if let Some(origin) = state.config.allowed_origin.as_deref() {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => cors = cors.allow_origin(origin),
            Err(e) => warn!("Ignoring invalid ALLOWED_ORIGIN {origin}: {e}"),
        }
    }

    Router::new()
        .route(CONTACT_ROUTE, post(contact_handler))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .layer(map_response(json_payload_too_large))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Body limit rejections come back as plain text, every other error here is JSON.
async fn json_payload_too_large(res: Response) -> Response {
    if res.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return res;
    }

    warn!("Contact form body over limit");
    AppError::PayloadTooLarge.into_response()
}

pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };

    error!("Contact form error: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Internal server error: {detail}") })),
    )
        .into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
