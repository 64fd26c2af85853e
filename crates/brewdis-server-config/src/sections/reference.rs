// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Location of the category/style reference data file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReferenceConfigLayer {
	pub path: Option<String>,
}

impl ReferenceConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.path.is_some() {
			self.path = other.path;
		}
	}

	pub fn finalize(self) -> ReferenceConfig {
		ReferenceConfig { path: self.path }
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReferenceConfig {
	/// JSON file with categories and styles. Unset serves empty lists.
	pub path: Option<String>,
}
