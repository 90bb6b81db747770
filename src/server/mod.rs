//! Axum HTTP surface.
//!
//! ## URL layout
//!
//! ```text
//! GET  /                  → plain-text liveness string
//! POST /chat              → { response }
//! POST /clear             → { message }
//! POST /set_preferences   → { message }
//! GET  /get_preferences   → { mode, personality }
//! GET  /modes             → { modes, personalities }
//! GET  /health            → { status, azure_openai_configured, features }
//! ```
//!
//! The server runs until the [`CancellationToken`] is cancelled, then shuts
//! down gracefully.

mod api;
pub mod identity;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::{get, post}};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::chat::ChatService;
use crate::error::AppError;

pub use identity::{Client, ClientResolver, FixedResolver, PeerAddrResolver};

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler.
///
/// Cheap to clone: all fields are reference-counted or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub resolver: Arc<dyn ClientResolver>,
    /// Reported by `/health`; computed once from config at startup.
    pub credentials_configured: bool,
}

impl AppState {
    pub fn new(chat: Arc<ChatService>, resolver: Arc<dyn ClientResolver>, credentials_configured: bool) -> Self {
        Self { chat, resolver, credentials_configured }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/",                get(api::root))
        .route("/chat",            post(api::chat))
        .route("/clear",           post(api::clear))
        .route("/set_preferences", post(api::set_preferences))
        .route("/get_preferences", get(api::get_preferences))
        .route("/modes",           get(api::modes))
        .route("/health",          get(api::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn serve(bind_addr: &str, state: AppState, shutdown: CancellationToken) -> Result<(), AppError> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| AppError::Server(format!("cannot read local address: {e}")))?;
    info!(%local_addr, "server listening");

    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("server shut down");
    Ok(())
}
