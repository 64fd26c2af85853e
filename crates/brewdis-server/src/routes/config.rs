// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, Json};
use brewdis_server_config::StompConfig;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

/// Websocket/STOMP settings the web client uses for live inventory updates.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StompSettings {
	pub protocol: String,
	pub host: String,
	pub port: u16,
	pub endpoint: String,
	pub destination_prefix: String,
	pub inventory_topic: String,
}

impl From<&StompConfig> for StompSettings {
	fn from(config: &StompConfig) -> Self {
		Self {
			protocol: config.protocol.clone(),
			host: config.host.clone(),
			port: config.port,
			endpoint: config.endpoint.clone(),
			destination_prefix: config.destination_prefix.clone(),
			inventory_topic: config.inventory_topic.clone(),
		}
	}
}

/// GET /api/config/stomp - Client STOMP settings.
#[utoipa::path(
    get,
    path = "/api/config/stomp",
    responses(
        (status = 200, description = "STOMP settings", body = StompSettings)
    ),
    tag = "config"
)]
pub async fn stomp_config(State(state): State<AppState>) -> Json<StompSettings> {
	Json(StompSettings::from(state.orchestrator.stomp()))
}
