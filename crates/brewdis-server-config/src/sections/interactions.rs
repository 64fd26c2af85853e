// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interaction recording configuration section.

use serde::{Deserialize, Serialize};

const DEFAULT_QUEUE_CAPACITY: usize = 10000;
const DEFAULT_STREAM: &str = "brewdis:interactions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueOverflowPolicy {
	#[default]
	DropNewest,
	Block,
}

impl std::str::FromStr for QueueOverflowPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"drop_newest" => Ok(QueueOverflowPolicy::DropNewest),
			"block" => Ok(QueueOverflowPolicy::Block),
			other => Err(format!("unknown overflow policy '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractionsConfigLayer {
	pub enabled: Option<bool>,
	pub queue_capacity: Option<usize>,
	pub queue_overflow_policy: Option<QueueOverflowPolicy>,
	/// Redis stream receiving interaction events. Unset means log-only.
	pub stream: Option<String>,
}

impl InteractionsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.queue_capacity.is_some() {
			self.queue_capacity = other.queue_capacity;
		}
		if other.queue_overflow_policy.is_some() {
			self.queue_overflow_policy = other.queue_overflow_policy;
		}
		if other.stream.is_some() {
			self.stream = other.stream;
		}
	}

	pub fn finalize(self) -> InteractionsConfig {
		InteractionsConfig {
			enabled: self.enabled.unwrap_or(true),
			queue_capacity: self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY).max(1),
			queue_overflow_policy: self.queue_overflow_policy.unwrap_or_default(),
			stream: self.stream.or_else(|| Some(DEFAULT_STREAM.to_string())),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionsConfig {
	pub enabled: bool,
	pub queue_capacity: usize,
	pub queue_overflow_policy: QueueOverflowPolicy,
	pub stream: Option<String>,
}

impl Default for InteractionsConfig {
	fn default() -> Self {
		InteractionsConfigLayer::default().finalize()
	}
}
