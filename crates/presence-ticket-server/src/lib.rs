//! # Presence Ticket Server
//!
//! The issuing side of presence tickets, over HTTP.
//!
//! ## Endpoints
//!
//! - `POST /api/sign` - `{ event_id, user_address }` to `{ signature, msg }`
//! - `GET /api/admin-pubkey` - `{ publicKey }`, the key to trust on-chain
//! - `GET /health` - liveness and authority key readiness
//!
//! ## Usage
//!
//! ```rust,no_run
//! use presence_ticket_server::{router, AppConfig, AppState, TicketService};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let state = AppState::new(TicketService::from_env());
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
//!     axum::serve(listener, router(state, &config.server)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod service;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use presence_ticket_core as core;

pub use crate::config::{AppConfig, ServerConfig};
pub use error::{ApiError, Result};
pub use service::{AuthorityState, AuthorityStatus, TicketService};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<TicketService>,
}

impl AppState {
    pub fn new(service: TicketService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/api/sign", post(api::sign_ticket))
        .route("/api/admin-pubkey", get(api::admin_pubkey))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}
