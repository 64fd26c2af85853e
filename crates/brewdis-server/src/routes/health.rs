// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
	api::AppState,
	health::{self, HealthComponents, HealthResponse, HealthStatus},
};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "Search store is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Store connectivity and recorder status.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	use tokio::time::Instant;

	let overall_start = Instant::now();

	let components = HealthComponents {
		store: health::check_store(state.store.as_ref()).await,
		interactions: health::check_interactions(state.orchestrator.interactions_enabled()),
	};

	let status = health::aggregate_status(&components);
	let duration_ms = overall_start.elapsed().as_millis() as u64;

	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms,
		version: env!("CARGO_PKG_VERSION").to_string(),
		components,
	};

	let http_status = match status {
		HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
