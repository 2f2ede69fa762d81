use std::sync::Arc;

use {
    axum::{
        Json,
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
    },
    bytes::Bytes,
    miru_line::{Error, SIGNATURE_HEADER, handle_webhook},
    secrecy::ExposeSecret,
    tracing::error,
};

use crate::state::GatewayState;

/// Receive a webhook batch.
///
/// The platform only needs an acknowledgment, so a processed batch always
/// answers `200 OK` regardless of individual event outcomes.
pub async fn webhook_handler(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match handle_webhook(
        &state.dispatcher,
        state.channel_secret.expose_secret(),
        &body,
        signature,
    )
    .await
    {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(Error::Authentication { .. }) => (StatusCode::UNAUTHORIZED, "invalid signature"),
        Err(Error::Parse(_)) => (StatusCode::BAD_REQUEST, "malformed payload"),
        Err(e) => {
            error!(error = %e, "webhook handling failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        },
    }
}

pub async fn health_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": state.version,
    }))
}
