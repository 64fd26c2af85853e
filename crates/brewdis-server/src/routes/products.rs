// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{
		rejection::{JsonRejection, QueryRejection},
		Query, State,
	},
	Json,
};
use brewdis_server_search::{ResultsPage, SearchCriteria};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{api::AppState, error::ServerError, session::Session};

/// Shopper location.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationParams {
	/// Longitude in degrees (required)
	pub longitude: Option<f64>,
	/// Latitude in degrees (required)
	pub latitude: Option<f64>,
}

/// POST /api/products - Full-text product search near the shopper.
#[utoipa::path(
    post,
    path = "/api/products",
    params(LocationParams),
    request_body = SearchCriteria,
    responses(
        (status = 200, description = "One page of matching products", body = ResultsPage),
        (status = 400, description = "Missing location or invalid criteria", body = crate::error::ErrorResponse),
        (status = 500, description = "Search store error", body = crate::error::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn search_products(
	State(state): State<AppState>,
	session: Session,
	params: Result<Query<LocationParams>, QueryRejection>,
	criteria: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<(Session, Json<ResultsPage>), ServerError> {
	let Query(params) = params?;
	let Json(criteria) = criteria?;

	let page = state
		.orchestrator
		.search_products(&session.id, &criteria, params.longitude, params.latitude)
		.await?;

	Ok((session, Json(page)))
}
