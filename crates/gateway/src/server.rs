use std::{net::SocketAddr, sync::Arc};

use {
    axum::{
        Router,
        http::header,
        routing::{get, post},
    },
    miru_config::MiruConfig,
    tower_http::{
        catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer,
        sensitive_headers::SetSensitiveRequestHeadersLayer, trace::TraceLayer,
    },
    tracing::info,
};

use crate::{
    state::GatewayState,
    webhook_routes::{health_handler, webhook_handler},
};

/// Webhook batches are small JSON documents; anything larger is refused.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the gateway router (shared between production startup and tests).
pub fn build_gateway_app(state: Arc<GatewayState>, webhook_path: &str) -> Router {
    let sensitive = [
        header::AUTHORIZATION,
        header::HeaderName::from_static(miru_line::SIGNATURE_HEADER),
    ];

    Router::new()
        .route("/health", get(health_handler))
        .route(webhook_path, post(webhook_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new(sensitive))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// Start the HTTP server and run until Ctrl-C.
pub async fn start_gateway(config: MiruConfig) -> anyhow::Result<()> {
    let state = GatewayState::from_config(&config).await?;
    let app = build_gateway_app(state, &config.server.webhook_path);

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        webhook_path = %config.server.webhook_path,
        "gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
