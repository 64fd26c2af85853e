// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Store (retail location) index configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_INDEX: &str = "stores";
const DEFAULT_SEARCH_LIMIT: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreConfigLayer {
	pub index: Option<String>,
	pub search_limit: Option<u64>,
}

impl StoreConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.index.is_some() {
			self.index = other.index;
		}
		if other.search_limit.is_some() {
			self.search_limit = other.search_limit;
		}
	}

	pub fn finalize(self) -> StoreConfig {
		StoreConfig {
			index: self.index.unwrap_or_else(|| DEFAULT_INDEX.to_string()),
			search_limit: self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
	pub index: String,
	/// Number of nearby stores looked up alongside a product search.
	pub search_limit: u64,
}

impl Default for StoreConfig {
	fn default() -> Self {
		StoreConfigLayer::default().finalize()
	}
}
