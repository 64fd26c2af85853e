// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::SinkError;
use crate::event::InteractionEvent;
use crate::sink::InteractionSink;

/// Writes each interaction as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl InteractionSink for TracingSink {
	fn name(&self) -> &str {
		"tracing"
	}

	async fn publish(&self, event: Arc<InteractionEvent>) -> Result<(), SinkError> {
		info!(
			target: "brewdis::interactions",
			event_id = %event.id,
			session = %event.session,
			stores = ?event.stores,
			products = ?event.products,
			"products viewed"
		);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_publish_never_fails() {
		let event = Arc::new(InteractionEvent::new("s", vec!["s1".into()], vec!["p1".into()]));
		assert!(TracingSink.publish(event).await.is_ok());
	}
}
