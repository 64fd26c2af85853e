// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inventory index, availability radius and stock level thresholds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_INDEX: &str = "inventory";
const DEFAULT_SEARCH_LIMIT: u64 = 1000;
const DEFAULT_AVAILABILITY_RADIUS: &str = "25 mi";

/// Unit accepted by the RediSearch geo filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
	M,
	Km,
	Mi,
	Ft,
}

impl DistanceUnit {
	pub fn as_str(&self) -> &'static str {
		match self {
			DistanceUnit::M => "m",
			DistanceUnit::Km => "km",
			DistanceUnit::Mi => "mi",
			DistanceUnit::Ft => "ft",
		}
	}
}

impl fmt::Display for DistanceUnit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DistanceUnit {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"m" => Ok(DistanceUnit::M),
			"km" => Ok(DistanceUnit::Km),
			"mi" => Ok(DistanceUnit::Mi),
			"ft" => Ok(DistanceUnit::Ft),
			other => Err(format!("unknown distance unit '{other}'")),
		}
	}
}

/// Radius of the circle used by availability and nearby-store lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRadius {
	pub value: f64,
	pub unit: DistanceUnit,
}

impl GeoRadius {
	pub fn new(value: f64, unit: DistanceUnit) -> Self {
		Self { value, unit }
	}
}

impl fmt::Display for GeoRadius {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.value, self.unit)
	}
}

impl FromStr for GeoRadius {
	type Err = String;

	/// Parses `"25 mi"` or `"25mi"`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let split = s
			.find(|c: char| c.is_ascii_alphabetic())
			.ok_or_else(|| format!("radius '{s}' has no unit"))?;
		let (value, unit) = s.split_at(split);
		let value: f64 = value
			.trim()
			.parse()
			.map_err(|_| format!("radius '{s}' has an invalid value"))?;
		if !value.is_finite() || value <= 0.0 {
			return Err(format!("radius '{s}' must be a positive number"));
		}
		Ok(GeoRadius {
			value,
			unit: unit.trim().parse()?,
		})
	}
}

/// Lower bounds (inclusive) of the low, medium and high availability levels.
///
/// Quantities below `low` are reported as `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThresholds {
	pub low: u64,
	pub medium: u64,
	pub high: u64,
}

impl Default for LevelThresholds {
	fn default() -> Self {
		Self {
			low: 1,
			medium: 10,
			high: 40,
		}
	}
}

impl LevelThresholds {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.low == 0 {
			return Err(ConfigError::Validation(
				"inventory.levels.low must be at least 1 so that zero stock reports 'none'"
					.to_string(),
			));
		}
		if !(self.low < self.medium && self.medium < self.high) {
			return Err(ConfigError::Validation(format!(
				"inventory.levels must be strictly ascending, got low={} medium={} high={}",
				self.low, self.medium, self.high
			)));
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LevelThresholdsLayer {
	pub low: Option<u64>,
	pub medium: Option<u64>,
	pub high: Option<u64>,
}

impl LevelThresholdsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.low.is_some() {
			self.low = other.low;
		}
		if other.medium.is_some() {
			self.medium = other.medium;
		}
		if other.high.is_some() {
			self.high = other.high;
		}
	}

	pub fn finalize(self) -> Result<LevelThresholds, ConfigError> {
		let defaults = LevelThresholds::default();
		let thresholds = LevelThresholds {
			low: self.low.unwrap_or(defaults.low),
			medium: self.medium.unwrap_or(defaults.medium),
			high: self.high.unwrap_or(defaults.high),
		};
		thresholds.validate()?;
		Ok(thresholds)
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventoryConfigLayer {
	pub index: Option<String>,
	pub search_limit: Option<u64>,
	pub availability_radius: Option<String>,
	#[serde(default)]
	pub levels: Option<LevelThresholdsLayer>,
}

impl InventoryConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.index.is_some() {
			self.index = other.index;
		}
		if other.search_limit.is_some() {
			self.search_limit = other.search_limit;
		}
		if other.availability_radius.is_some() {
			self.availability_radius = other.availability_radius;
		}
		if let Some(other_levels) = other.levels {
			self
				.levels
				.get_or_insert_with(Default::default)
				.merge(other_levels);
		}
	}

	pub fn finalize(self) -> Result<InventoryConfig, ConfigError> {
		let radius = self
			.availability_radius
			.as_deref()
			.unwrap_or(DEFAULT_AVAILABILITY_RADIUS);
		let availability_radius = radius
			.parse()
			.map_err(|message| ConfigError::invalid("inventory.availability_radius", message))?;

		let search_limit = self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
		if search_limit == 0 {
			return Err(ConfigError::invalid(
				"inventory.search_limit",
				"must be greater than zero",
			));
		}

		Ok(InventoryConfig {
			index: self.index.unwrap_or_else(|| DEFAULT_INDEX.to_string()),
			search_limit,
			availability_radius,
			levels: self.levels.unwrap_or_default().finalize()?,
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryConfig {
	pub index: String,
	/// Upper bound on documents returned by inventory and availability lookups.
	pub search_limit: u64,
	pub availability_radius: GeoRadius,
	pub levels: LevelThresholds,
}

impl Default for InventoryConfig {
	fn default() -> Self {
		Self {
			index: DEFAULT_INDEX.to_string(),
			search_limit: DEFAULT_SEARCH_LIMIT,
			availability_radius: GeoRadius::new(25.0, DistanceUnit::Mi),
			levels: LevelThresholds::default(),
		}
	}
}
