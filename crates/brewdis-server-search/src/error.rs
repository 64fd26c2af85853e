// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for query compilation and store access.

use thiserror::Error;

/// Errors returned by the search store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Connection or command failure reported by the Redis client.
	#[error("Redis error: {0}")]
	Redis(#[from] redis::RedisError),

	/// The store answered with a reply the client cannot interpret.
	#[error("Unexpected reply from store: {0}")]
	UnexpectedReply(String),
}

/// Errors raised while turning client input into a query expression.
///
/// These are validation failures and are always detected before the store is
/// contacted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CriteriaError {
	#[error("{name} {value} is outside [{min}, {max}]")]
	CoordinateOutOfRange {
		name: &'static str,
		value: f64,
		min: f64,
		max: f64,
	},

	#[error("{0} must be a finite number")]
	NonFiniteCoordinate(&'static str),

	#[error("query is {length} characters long, the maximum is {max}")]
	QueryTooLong { length: usize, max: usize },

	#[error("query contains control characters")]
	ControlCharacters,

	#[error("query has unbalanced '{0}'")]
	Unbalanced(char),

	#[error("query has an unterminated quoted phrase")]
	UnterminatedPhrase,

	#[error("query ends with a dangling '\\' escape")]
	DanglingEscape,

	#[error("pageSize must be greater than zero")]
	ZeroPageSize,

	#[error("pageSize {page_size} exceeds the maximum of {max}")]
	PageTooLarge { page_size: u64, max: u64 },

	#[error("page {page_index} of size {page_size} is out of range")]
	PaginationOverflow { page_index: u64, page_size: u64 },

	#[error("invalid geo filter '{0}'")]
	InvalidGeoFilter(String),
}
