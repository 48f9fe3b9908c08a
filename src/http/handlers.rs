//! Route handlers.
//!
//! Each handler makes one upstream call; the user handler then hands the
//! record to the aggregator before replying.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::aggregator::enrich_projects;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /api/siege/user/{user_id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let start = Instant::now();

    let result = match state.client.user(&user_id).await {
        Ok(user) => Ok(enrich_projects(&state.client, user).await),
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "User fetch failed");
            Err(ApiError::from(e))
        }
    };

    metrics::record_request("user", status_of(&result).as_u16(), start);
    result.map(Json)
}

/// `GET /api/siege/leaderboard/`
///
/// Upstream JSON is forwarded unmodified, with the upstream status.
pub async fn get_leaderboard(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let (status, response) = match state.client.leaderboard().await {
        Ok((status, body)) => {
            if !status.is_success() {
                tracing::warn!(status = %status, "Leaderboard upstream returned an error body");
            }
            (status, (status, Json(body)).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Leaderboard fetch failed");
            let e = ApiError::from(e);
            (e.status_code(), e.into_response())
        }
    };

    metrics::record_request("leaderboard", status.as_u16(), start);
    response
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn status_of<T>(result: &Result<T, ApiError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    }
}
