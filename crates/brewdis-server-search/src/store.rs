// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{SearchOptions, SearchReply, SuggestOptions, SuggestionEntry};

/// Query interface of the index store.
#[async_trait]
pub trait SearchStore: Send + Sync {
	/// Runs a query against an index and returns the total match count and the
	/// requested page of documents.
	async fn search(
		&self,
		index: &str,
		query: &str,
		options: &SearchOptions,
	) -> Result<SearchReply, StoreError>;

	/// Looks up entries of a suggestion dictionary starting with `prefix`.
	async fn suggest(
		&self,
		dictionary: &str,
		prefix: &str,
		options: &SuggestOptions,
	) -> Result<Vec<SuggestionEntry>, StoreError>;

	/// Checks that the store is reachable.
	async fn ping(&self) -> Result<(), StoreError>;
}
