// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Query and result handling for the Brewdis product discovery server.
//!
//! This crate turns client criteria into RediSearch queries, runs them
//! through a [`SearchStore`], and post-processes the documents that come
//! back. [`RediSearchStore`] is the production store.

pub mod augment;
pub mod criteria;
pub mod error;
pub mod executor;
pub mod redisearch;
pub mod store;
pub mod suggest;
pub mod types;

pub use augment::ResultAugmenter;
pub use criteria::{GeoFilter, QueryExpression};
pub use error::{CriteriaError, StoreError};
pub use executor::SearchExecutor;
pub use redisearch::RediSearchStore;
pub use store::SearchStore;
pub use suggest::SuggestionService;
pub use types::{
	AvailabilityLevel, BrewerySuggestion, Executed, RawResult, ResultsPage, SearchCriteria,
	SearchOptions, SearchReply, SortBy, SortDirection, SuggestOptions, SuggestionEntry,
};
