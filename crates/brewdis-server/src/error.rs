// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	extract::rejection::{JsonRejection, QueryRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use brewdis_server_search::{CriteriaError, StoreError};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Client input failed validation.
	#[error("Invalid request: {0}")]
	Validation(String),

	/// A required request parameter was absent.
	#[error("Missing required parameter '{0}'")]
	MissingParameter(&'static str),

	/// The search store failed.
	#[error("Store error: {0}")]
	Store(#[from] StoreError),
}

impl From<CriteriaError> for ServerError {
	fn from(e: CriteriaError) -> Self {
		ServerError::Validation(e.to_string())
	}
}

impl From<QueryRejection> for ServerError {
	fn from(e: QueryRejection) -> Self {
		ServerError::Validation(e.body_text())
	}
}

impl From<JsonRejection> for ServerError {
	fn from(e: JsonRejection) -> Self {
		ServerError::Validation(e.body_text())
	}
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error, message) = match &self {
			ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
			ServerError::MissingParameter(name) => (
				StatusCode::BAD_REQUEST,
				"bad_request",
				format!("Missing required parameter '{name}'"),
			),
			ServerError::Store(e) => {
				tracing::error!(error = %e, "store error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"store_error",
					e.to_string(),
				)
			}
		};

		(
			status,
			Json(ErrorResponse {
				error: error.to_string(),
				message,
			}),
		)
			.into_response()
	}
}
