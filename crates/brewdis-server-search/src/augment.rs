// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derived fields computed on the response side.

use brewdis_server_config::{FieldsConfig, InventoryConfig, LevelThresholds};
use tracing::warn;

use crate::types::{AvailabilityLevel, RawResult};

/// Buckets a quantity into an availability level.
///
/// Each threshold is the inclusive lower bound of its level.
pub fn level(quantity: u64, thresholds: &LevelThresholds) -> AvailabilityLevel {
	if quantity >= thresholds.high {
		AvailabilityLevel::High
	} else if quantity >= thresholds.medium {
		AvailabilityLevel::Medium
	} else if quantity >= thresholds.low {
		AvailabilityLevel::Low
	} else {
		AvailabilityLevel::None
	}
}

/// Reads a stock quantity, treating missing, unreadable and negative values as zero.
pub fn quantity(result: &RawResult, field: &str) -> u64 {
	let Some(raw) = result.get(field) else {
		return 0;
	};
	let raw = raw.trim();
	if let Ok(value) = raw.parse::<i64>() {
		return u64::try_from(value).unwrap_or(0);
	}
	match raw.parse::<f64>() {
		Ok(value) if value.is_finite() => {
			if value <= 0.0 {
				0
			} else {
				value.floor() as u64
			}
		}
		_ => {
			warn!(key = result.key(), field, value = raw, "Unreadable stock quantity, using 0");
			0
		}
	}
}

/// Writes the availability level into inventory documents.
#[derive(Debug, Clone)]
pub struct ResultAugmenter {
	thresholds: LevelThresholds,
	quantity_field: String,
	level_field: String,
}

impl ResultAugmenter {
	pub fn new(
		thresholds: LevelThresholds,
		quantity_field: impl Into<String>,
		level_field: impl Into<String>,
	) -> Self {
		Self {
			thresholds,
			quantity_field: quantity_field.into(),
			level_field: level_field.into(),
		}
	}

	pub fn from_config(inventory: &InventoryConfig, fields: &FieldsConfig) -> Self {
		Self::new(
			inventory.levels,
			fields.available_to_promise.clone(),
			fields.level.clone(),
		)
	}

	/// Sets the level field, replacing any previous value.
	pub fn augment(&self, result: &mut RawResult) {
		let level = level(quantity(result, &self.quantity_field), &self.thresholds);
		result.insert(self.level_field.clone(), level.as_str());
	}

	pub fn augment_all(&self, results: &mut [RawResult]) {
		for result in results {
			self.augment(result);
		}
	}
}
