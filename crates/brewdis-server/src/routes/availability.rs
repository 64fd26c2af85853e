// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{rejection::QueryRejection, Query, State},
	Json,
};
use brewdis_server_search::RawResult;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{api::AppState, error::ServerError};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityParams {
	/// Restrict to one product
	pub sku: Option<String>,
	/// Longitude in degrees (required)
	pub longitude: Option<f64>,
	/// Latitude in degrees (required)
	pub latitude: Option<f64>,
}

/// GET /api/availability - Nearby inventory with a derived `level` field.
#[utoipa::path(
    get,
    path = "/api/availability",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Inventory documents with stock level", body = Vec<RawResult>),
        (status = 400, description = "Missing or invalid location", body = crate::error::ErrorResponse),
        (status = 500, description = "Search store error", body = crate::error::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn availability(
	State(state): State<AppState>,
	params: Result<Query<AvailabilityParams>, QueryRejection>,
) -> Result<Json<Vec<RawResult>>, ServerError> {
	let Query(params) = params?;
	let documents = state
		.orchestrator
		.availability(params.sku.as_deref(), params.longitude, params.latitude)
		.await?;
	Ok(Json(documents))
}
