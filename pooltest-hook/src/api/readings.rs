//! Listing of stored readings
//!
//! Only mounted when the backend supports listing.

use axum::{
    extract::{ConnectInfo, State},
    http::Method,
    Json,
};
use pooltest_common::StoredMeasurement;
use serde::Serialize;
use std::net::SocketAddr;
use tracing::{debug, error};

use super::client_ip;
use crate::{ApiError, AppState};

/// Readings response, oldest first
#[derive(Debug, Serialize)]
pub struct ReadingsResponse {
    pub readings: Vec<StoredMeasurement>,
}

/// GET /readings
pub async fn list_readings(
    State(state): State<AppState>,
    method: Method,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<ReadingsResponse>, ApiError> {
    let client_ip = client_ip(connect_info);

    if method != Method::GET {
        debug!(client_ip = %client_ip, method = %method, "Rejected readings request: method");
        return Err(ApiError::MethodNotAllowed("GET, OPTIONS"));
    }

    let readings = state.store.list_all().await.map_err(|e| {
        error!(client_ip = %client_ip, error = %e, "Error retrieving readings");
        ApiError::ListFailed(e)
    })?;

    debug!(client_ip = %client_ip, count = readings.len(), "Readings listed");

    Ok(Json(ReadingsResponse { readings }))
}
