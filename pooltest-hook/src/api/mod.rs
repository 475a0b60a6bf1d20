//! HTTP API handlers for pooltest-hook

use axum::extract::ConnectInfo;
use std::net::SocketAddr;

pub mod cors;
pub mod health;
pub mod readings;
pub mod webhook;

pub use cors::cors;
pub use health::health_routes;
pub use readings::list_readings;
pub use webhook::receive_webhook;

/// Client IP for log fields
///
/// Connect info is absent when the router is driven without a socket
/// (e.g. `oneshot` in tests).
pub fn client_ip(connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
