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
pub struct InventoryParams {
	/// Restrict to one store id
	pub store: Option<String>,
}

/// GET /api/inventory - Inventory with stock, ordered by store.
#[utoipa::path(
    get,
    path = "/api/inventory",
    params(InventoryParams),
    responses(
        (status = 200, description = "Inventory documents", body = Vec<RawResult>),
        (status = 500, description = "Search store error", body = crate::error::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(
	State(state): State<AppState>,
	params: Result<Query<InventoryParams>, QueryRejection>,
) -> Result<Json<Vec<RawResult>>, ServerError> {
	let Query(params) = params?;
	let documents = state
		.orchestrator
		.inventory(params.store.as_deref())
		.await?;
	Ok(Json(documents))
}
