// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Product index and suggestion dictionary configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_INDEX: &str = "products";
const DEFAULT_BREWERY_DICTIONARY: &str = "breweries";
const DEFAULT_FOOD_DICTIONARY: &str = "foods";
const DEFAULT_HIGHLIGHT_OPEN: &str = "<mark>";
const DEFAULT_HIGHLIGHT_CLOSE: &str = "</mark>";
const DEFAULT_SUGGESTION_LIMIT: u32 = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductConfigLayer {
	pub index: Option<String>,
	pub highlight_open: Option<String>,
	pub highlight_close: Option<String>,
	pub suggestion_limit: Option<u32>,
	#[serde(default)]
	pub brewery: Option<DictionaryConfigLayer>,
	#[serde(default)]
	pub food_pairings: Option<DictionaryConfigLayer>,
}

impl ProductConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.index.is_some() {
			self.index = other.index;
		}
		if other.highlight_open.is_some() {
			self.highlight_open = other.highlight_open;
		}
		if other.highlight_close.is_some() {
			self.highlight_close = other.highlight_close;
		}
		if other.suggestion_limit.is_some() {
			self.suggestion_limit = other.suggestion_limit;
		}
		if let Some(other_brewery) = other.brewery {
			self
				.brewery
				.get_or_insert_with(Default::default)
				.merge(other_brewery);
		}
		if let Some(other_foods) = other.food_pairings {
			self
				.food_pairings
				.get_or_insert_with(Default::default)
				.merge(other_foods);
		}
	}

	pub fn finalize(self) -> ProductConfig {
		ProductConfig {
			index: self.index.unwrap_or_else(|| DEFAULT_INDEX.to_string()),
			highlight_open: self
				.highlight_open
				.unwrap_or_else(|| DEFAULT_HIGHLIGHT_OPEN.to_string()),
			highlight_close: self
				.highlight_close
				.unwrap_or_else(|| DEFAULT_HIGHLIGHT_CLOSE.to_string()),
			suggestion_limit: self.suggestion_limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT),
			brewery: self
				.brewery
				.unwrap_or_default()
				.finalize(DEFAULT_BREWERY_DICTIONARY, true),
			food_pairings: self
				.food_pairings
				.unwrap_or_default()
				.finalize(DEFAULT_FOOD_DICTIONARY, false),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductConfig {
	pub index: String,
	pub highlight_open: String,
	pub highlight_close: String,
	/// Maximum number of entries returned by a suggestion lookup.
	pub suggestion_limit: u32,
	pub brewery: DictionaryConfig,
	pub food_pairings: DictionaryConfig,
}

impl Default for ProductConfig {
	fn default() -> Self {
		ProductConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DictionaryConfigLayer {
	pub index: Option<String>,
	pub fuzzy: Option<bool>,
}

impl DictionaryConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.index.is_some() {
			self.index = other.index;
		}
		if other.fuzzy.is_some() {
			self.fuzzy = other.fuzzy;
		}
	}

	pub fn finalize(self, default_index: &str, default_fuzzy: bool) -> DictionaryConfig {
		DictionaryConfig {
			index: self.index.unwrap_or_else(|| default_index.to_string()),
			fuzzy: self.fuzzy.unwrap_or(default_fuzzy),
		}
	}
}

/// A suggestion dictionary (`FT.SUGADD` key) and whether lookups are fuzzy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DictionaryConfig {
	pub index: String,
	pub fuzzy: bool,
}
