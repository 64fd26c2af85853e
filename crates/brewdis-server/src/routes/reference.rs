// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{rejection::QueryRejection, Query, State},
	Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
	api::AppState,
	error::ServerError,
	reference::{Category, Style},
};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StyleParams {
	/// Category id
	pub category: Option<String>,
}

/// GET /api/categories - All beer categories.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Beer categories", body = Vec<Category>)
    ),
    tag = "reference"
)]
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
	Json(state.orchestrator.categories())
}

/// GET /api/styles - Styles of one category.
#[utoipa::path(
    get,
    path = "/api/styles",
    params(StyleParams),
    responses(
        (status = 200, description = "Styles of the category, empty when unknown", body = Vec<Style>)
    ),
    tag = "reference"
)]
pub async fn list_styles(
	State(state): State<AppState>,
	params: Result<Query<StyleParams>, QueryRejection>,
) -> Result<Json<Vec<Style>>, ServerError> {
	let Query(params) = params?;
	Ok(Json(state.orchestrator.styles(params.category.as_deref())))
}
