// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Autocomplete lookups against suggestion dictionaries.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::SearchStore;
use crate::types::{BrewerySuggestion, BrewerySuggestionPayload, SuggestOptions, SuggestionEntry};

/// Prefix lookups with a shared result cap.
#[derive(Clone)]
pub struct SuggestionService {
	store: Arc<dyn SearchStore>,
	max: u32,
}

impl SuggestionService {
	pub fn new(store: Arc<dyn SearchStore>, max: u32) -> Self {
		Self { store, max }
	}

	/// Raw dictionary entries in store order. An absent prefix is treated as empty.
	pub async fn suggest(
		&self,
		dictionary: &str,
		prefix: Option<&str>,
		fuzzy: bool,
	) -> Result<Vec<SuggestionEntry>, StoreError> {
		let prefix = prefix.unwrap_or_default();
		let options = SuggestOptions {
			fuzzy,
			max: self.max,
		};
		let entries = self.store.suggest(dictionary, prefix, &options).await?;
		debug!(dictionary, prefix, fuzzy, count = entries.len(), "Suggestions fetched");
		Ok(entries)
	}

	/// Suggestions whose payload carries the brewery id and icon.
	///
	/// Entries with an undecodable payload are kept with no id or icon.
	pub async fn brewery_suggestions(
		&self,
		dictionary: &str,
		prefix: Option<&str>,
		fuzzy: bool,
	) -> Result<Vec<BrewerySuggestion>, StoreError> {
		let entries = self.suggest(dictionary, prefix, fuzzy).await?;
		Ok(entries.into_iter().map(decode_brewery).collect())
	}

	/// Display strings only; payloads are ignored.
	pub async fn plain_suggestions(
		&self,
		dictionary: &str,
		prefix: Option<&str>,
		fuzzy: bool,
	) -> Result<Vec<String>, StoreError> {
		let entries = self.suggest(dictionary, prefix, fuzzy).await?;
		Ok(entries.into_iter().map(|entry| entry.string).collect())
	}
}

pub fn decode_brewery(entry: SuggestionEntry) -> BrewerySuggestion {
	let payload = match entry.payload.as_deref() {
		Some(bytes) => serde_json::from_slice::<BrewerySuggestionPayload>(bytes).unwrap_or_else(|e| {
			warn!(suggestion = %entry.string, error = %e, "Could not decode brewery payload");
			BrewerySuggestionPayload::default()
		}),
		None => {
			warn!(suggestion = %entry.string, "Brewery suggestion has no payload");
			BrewerySuggestionPayload::default()
		}
	};
	BrewerySuggestion {
		id: payload.id,
		name: entry.string,
		icon: payload.icon,
	}
}
