// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static category and style reference data.
//!
//! The data file looks like:
//!
//! ```json
//! {
//!   "categories": [{ "id": "3", "name": "North American Ale" }],
//!   "styles": { "3": [{ "id": "30", "name": "American-Style IPA" }] }
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
	pub id: String,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Style {
	pub id: String,
	pub name: String,
}

/// Read access to reference data.
pub trait ReferenceData: Send + Sync {
	fn categories(&self) -> Vec<Category>;

	/// Styles of a category; empty when the category is unknown.
	fn styles(&self, category: &str) -> Vec<Style>;
}

#[derive(Debug, Error)]
pub enum ReferenceError {
	#[error("Failed to read reference data {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse reference data {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// Reference data loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReferenceCatalog {
	#[serde(default)]
	categories: Vec<Category>,
	#[serde(default)]
	styles: HashMap<String, Vec<Style>>,
}

impl ReferenceCatalog {
	pub fn new(categories: Vec<Category>, styles: HashMap<String, Vec<Style>>) -> Self {
		Self { categories, styles }
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| ReferenceError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let catalog: Self = serde_json::from_str(&content).map_err(|source| ReferenceError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::info!(
			path = %path.display(),
			categories = catalog.categories.len(),
			"Loaded reference data"
		);
		Ok(catalog)
	}
}

impl ReferenceData for ReferenceCatalog {
	fn categories(&self) -> Vec<Category> {
		self.categories.clone()
	}

	fn styles(&self, category: &str) -> Vec<Style> {
		self.styles.get(category).cloned().unwrap_or_default()
	}
}
