// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check types and component checking logic.

use std::time::Duration;

use brewdis_server_search::SearchStore;
use serde::Serialize;
use tokio::time::{timeout, Instant};
use utoipa::ToSchema;

const STORE_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Health status for components and overall system.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Degraded,
	Unhealthy,
}

/// Search store component health.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoreHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Interaction recorder component health.
#[derive(Debug, Serialize, ToSchema)]
pub struct InteractionsHealth {
	pub status: HealthStatus,
	pub enabled: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthComponents {
	pub store: StoreHealth,
	pub interactions: InteractionsHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub duration_ms: u64,
	pub version: String,
	pub components: HealthComponents,
}

/// Check store connectivity with a `PING`.
pub async fn check_store(store: &dyn SearchStore) -> StoreHealth {
	let start = Instant::now();

	let result = timeout(STORE_CHECK_TIMEOUT, store.ping()).await;
	let latency_ms = start.elapsed().as_millis() as u64;

	match result {
		Ok(Ok(())) => StoreHealth {
			status: HealthStatus::Healthy,
			latency_ms,
			error: None,
		},
		Ok(Err(e)) => StoreHealth {
			status: HealthStatus::Unhealthy,
			latency_ms,
			error: Some(e.to_string()),
		},
		Err(_) => StoreHealth {
			status: HealthStatus::Unhealthy,
			latency_ms,
			error: Some("store health check timed out".to_string()),
		},
	}
}

/// Interaction recording is optional, so a disabled recorder only degrades.
pub fn check_interactions(enabled: bool) -> InteractionsHealth {
	InteractionsHealth {
		status: if enabled {
			HealthStatus::Healthy
		} else {
			HealthStatus::Degraded
		},
		enabled,
	}
}

pub fn aggregate_status(components: &HealthComponents) -> HealthStatus {
	let statuses = [components.store.status, components.interactions.status];

	if statuses.contains(&HealthStatus::Unhealthy) {
		HealthStatus::Unhealthy
	} else if statuses.contains(&HealthStatus::Degraded) {
		HealthStatus::Degraded
	} else {
		HealthStatus::Healthy
	}
}
