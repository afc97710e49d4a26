use crate::{error::ApiError, links, AppState};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ── Request / response bodies ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ShortenRequest {
    /// A missing field is treated the same as an empty one.
    #[serde(default)]
    url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// POST /shorten
///
/// The body is taken as raw bytes rather than through `Json` so that any
/// content type is accepted and a malformed body always answers 400.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ShortenResponse>, ApiError> {
    let body = body.map_err(|e| {
        tracing::debug!("Unreadable shorten body: {}", e);
        ApiError::UnreadableBody
    })?;

    let request: ShortenRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidJson)?;
    let url = links::validate_url(&request.url)?;

    let code = links::shorten(&state.store, &state.codes, url).await;

    Ok(Json(ShortenResponse {
        short_url: state.config.short_url(&code),
    }))
}

/// Any method other than POST on /shorten.
pub async fn method_not_allowed() -> ApiError {
    ApiError::ShortenMethod
}
