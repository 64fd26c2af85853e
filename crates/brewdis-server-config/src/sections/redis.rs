// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection settings for the RediSearch-enabled Redis instance.

use serde::{Deserialize, Serialize};

const DEFAULT_URL: &str = "redis://localhost:6379";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RedisConfigLayer {
	pub url: Option<String>,
}

impl RedisConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.url.is_some() {
			self.url = other.url;
		}
	}

	pub fn finalize(self) -> RedisConfig {
		RedisConfig {
			url: self.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedisConfig {
	pub url: String,
}

impl Default for RedisConfig {
	fn default() -> Self {
		RedisConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_url() {
		assert_eq!(RedisConfig::default().url, "redis://localhost:6379");
	}

	#[test]
	fn test_merge_preserves_base_when_none() {
		let mut base = RedisConfigLayer {
			url: Some("redis://cache:6380".to_string()),
		};
		base.merge(RedisConfigLayer::default());
		assert_eq!(base.finalize().url, "redis://cache:6380");
	}
}
