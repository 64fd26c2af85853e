// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use brewdis_server_config::ServerConfig;
use brewdis_server_interactions::{
	InteractionRecorder, InteractionSink, RedisStreamSink, TracingSink,
};
use brewdis_server_search::SearchStore;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
	api_docs::ApiDoc,
	orchestrator::QueryOrchestrator,
	reference::{ReferenceCatalog, ReferenceData, ReferenceError},
	routes,
};

#[derive(Clone)]
pub struct AppState {
	pub config: Arc<ServerConfig>,
	pub store: Arc<dyn SearchStore>,
	pub orchestrator: Arc<QueryOrchestrator>,
}

pub fn create_app_state(
	config: Arc<ServerConfig>,
	store: Arc<dyn SearchStore>,
	recorder: InteractionRecorder,
	reference: Arc<dyn ReferenceData>,
) -> AppState {
	let orchestrator = Arc::new(QueryOrchestrator::new(
		Arc::clone(&config),
		Arc::clone(&store),
		recorder,
		reference,
	));
	AppState {
		config,
		store,
		orchestrator,
	}
}

/// Builds the interaction recorder from configuration.
///
/// A stream sink that cannot connect is skipped with a warning; the tracing
/// sink is always installed.
pub async fn create_recorder(config: &ServerConfig) -> InteractionRecorder {
	let interactions = &config.interactions;
	if !interactions.enabled {
		tracing::info!("Interaction recording disabled");
		return InteractionRecorder::disabled();
	}

	let mut sinks: Vec<Arc<dyn InteractionSink>> = vec![Arc::new(TracingSink)];

	if let Some(stream) = interactions.stream.as_deref().filter(|s| !s.is_empty()) {
		match RedisStreamSink::connect(&config.redis.url, stream).await {
			Ok(sink) => {
				tracing::info!(stream, "Recording interactions to Redis stream");
				sinks.push(Arc::new(sink));
			}
			Err(e) => {
				tracing::warn!(stream, error = %e, "Redis stream sink unavailable, continuing without it");
			}
		}
	}

	InteractionRecorder::new(
		interactions.queue_capacity,
		interactions.queue_overflow_policy,
		sinks,
	)
}

/// Loads reference data from the configured file, or an empty catalog.
pub fn load_reference(config: &ServerConfig) -> Result<Arc<dyn ReferenceData>, ReferenceError> {
	match config.reference.path.as_deref() {
		Some(path) => Ok(Arc::new(ReferenceCatalog::load(path)?)),
		None => {
			tracing::warn!("No reference data configured, categories and styles will be empty");
			Ok(Arc::new(ReferenceCatalog::default()))
		}
	}
}

pub fn create_router(state: AppState) -> Router {
	let api = Router::new()
		.route("/products", post(routes::products::search_products))
		.route("/inventory", get(routes::inventory::list_inventory))
		.route("/availability", get(routes::availability::availability))
		.route("/breweries", get(routes::suggestions::suggest_breweries))
		.route("/foods", get(routes::suggestions::suggest_foods))
		.route("/categories", get(routes::reference::list_categories))
		.route("/styles", get(routes::reference::list_styles))
		.route("/config/stomp", get(routes::config::stomp_config));

	Router::new()
		.route("/health", get(routes::health::health_check))
		.nest("/api", api)
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
		.with_state(state)
}
