//! Webhook ingestion
//!
//! `POST /webhook` checks, in order: method, content type, JSON body. The
//! first failing check ends the request. A valid body is normalized and
//! handed to the store exactly once.

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Method},
    Json,
};
use pooltest_common::{normalize, parse_payload};
use serde::Serialize;
use std::net::SocketAddr;
use tracing::{debug, error, info};

use super::client_ip;
use crate::{ApiError, AppState};

/// Acknowledgement sent for every stored payload
pub const STORED_MESSAGE: &str = "Payload received and stored.";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        == Some("application/json")
}

/// POST /webhook
pub async fn receive_webhook(
    State(state): State<AppState>,
    method: Method,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let client_ip = client_ip(connect_info);

    if method != Method::POST {
        debug!(client_ip = %client_ip, method = %method, "Rejected webhook: method");
        return Err(ApiError::MethodNotAllowed("POST, OPTIONS"));
    }

    if !is_json_content_type(&headers) {
        debug!(client_ip = %client_ip, "Rejected webhook: content type");
        return Err(ApiError::UnsupportedMediaType);
    }

    let payload = parse_payload(&body).map_err(|e| {
        debug!(client_ip = %client_ip, error = %e, "Rejected webhook: invalid JSON");
        ApiError::InvalidJson(e)
    })?;

    let measurement = normalize(&payload);

    if let Err(e) = state.store.store(&measurement).await {
        error!(
            client_ip = %client_ip,
            backend = state.store.backend_name(),
            error = %e,
            "Error storing payload"
        );
        return Err(ApiError::StoreFailed(e));
    }

    info!(client_ip = %client_ip, "Payload stored successfully");

    Ok(Json(MessageResponse {
        message: STORED_MESSAGE.to_string(),
    }))
}
