//! Gateway: HTTP server in front of the LINE webhook.
//!
//! Lifecycle:
//! 1. Load config and validate credentials (fatal if missing)
//! 2. Build the LINE and vision clients and the event dispatcher once
//! 3. Serve `POST <webhook_path>` and `GET /health`

pub mod server;
pub mod state;
pub mod webhook_routes;

pub use {
    server::{build_gateway_app, start_gateway},
    state::GatewayState,
};
