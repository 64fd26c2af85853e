// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The interaction event emitted after a product search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A session was shown a set of products near a set of stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
	pub id: Uuid,
	pub timestamp: DateTime<Utc>,
	pub session: String,
	/// Store ids near the shopper, in distance order.
	pub stores: Vec<String>,
	/// Product ids on the page that was served.
	pub products: Vec<String>,
}

impl InteractionEvent {
	pub fn new(session: impl Into<String>, stores: Vec<String>, products: Vec<String>) -> Self {
		Self {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			session: session.into(),
			stores,
			products,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_event_has_unique_id() {
		let a = InteractionEvent::new("s", vec![], vec![]);
		let b = InteractionEvent::new("s", vec![], vec![]);
		assert_ne!(a.id, b.id);
	}

	#[test]
	fn test_event_serializes_lists() {
		let event = InteractionEvent::new(
			"session-1",
			vec!["s1".to_string(), "s2".to_string()],
			vec!["IPA-001".to_string()],
		);
		let json = serde_json::to_value(&event).unwrap();
		assert_eq!(json["session"], "session-1");
		assert_eq!(json["stores"], serde_json::json!(["s1", "s2"]));
		assert_eq!(json["products"], serde_json::json!(["IPA-001"]));
	}
}
