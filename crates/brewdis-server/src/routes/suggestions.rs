// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{rejection::QueryRejection, Query, State},
	Json,
};
use brewdis_server_search::BrewerySuggestion;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{api::AppState, error::ServerError};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrefixParams {
	/// Typed prefix (default: empty)
	pub prefix: Option<String>,
}

/// GET /api/breweries - Brewery autocomplete.
#[utoipa::path(
    get,
    path = "/api/breweries",
    params(PrefixParams),
    responses(
        (status = 200, description = "Matching breweries", body = Vec<BrewerySuggestion>),
        (status = 500, description = "Search store error", body = crate::error::ErrorResponse)
    ),
    tag = "suggestions"
)]
pub async fn suggest_breweries(
	State(state): State<AppState>,
	params: Result<Query<PrefixParams>, QueryRejection>,
) -> Result<Json<Vec<BrewerySuggestion>>, ServerError> {
	let Query(params) = params?;
	let suggestions = state
		.orchestrator
		.brewery_suggestions(params.prefix.as_deref())
		.await?;
	Ok(Json(suggestions))
}

/// GET /api/foods - Food pairing autocomplete.
#[utoipa::path(
    get,
    path = "/api/foods",
    params(PrefixParams),
    responses(
        (status = 200, description = "Matching food pairings", body = Vec<String>),
        (status = 500, description = "Search store error", body = crate::error::ErrorResponse)
    ),
    tag = "suggestions"
)]
pub async fn suggest_foods(
	State(state): State<AppState>,
	params: Result<Query<PrefixParams>, QueryRejection>,
) -> Result<Json<Vec<String>>, ServerError> {
	let Query(params) = params?;
	let foods = state
		.orchestrator
		.food_suggestions(params.prefix.as_deref())
		.await?;
	Ok(Json(foods))
}
