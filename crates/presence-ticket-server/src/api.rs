//! HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use presence_ticket_core::TicketEnvelope;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::service::AuthorityStatus;
use crate::AppState;

/// Body of `POST /api/sign`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignRequest {
    pub event_id: Option<String>,
    pub user_address: Option<String>,
}

/// Body of `GET /api/admin-pubkey`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub authority: AuthorityStatus,
}

/// `POST /api/sign`: issue a ticket for `(event_id, user_address)`.
pub async fn sign_ticket(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignRequest>, JsonRejection>,
) -> Result<Json<TicketEnvelope>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let event_id = request.event_id.unwrap_or_default();
    let user_address = request.user_address.unwrap_or_default();

    let ticket = state.service.issue(&event_id, &user_address)?;
    Ok(Json(TicketEnvelope::from_ticket(&ticket)))
}

/// `GET /api/admin-pubkey`: the key to provision in the ledger program.
pub async fn admin_pubkey(State(state): State<AppState>) -> Result<Json<PublicKeyResponse>> {
    let public_key = state.service.public_key()?;
    Ok(Json(PublicKeyResponse {
        public_key: public_key.to_base64(),
    }))
}

/// `GET /health`: liveness plus authority key readiness.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        authority: state.service.authority_status(),
    })
}
