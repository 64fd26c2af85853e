// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SinkError;
use crate::event::InteractionEvent;

#[cfg(feature = "sink-redis-stream")]
pub mod redis_stream;
#[cfg(feature = "sink-tracing")]
pub mod tracing;

/// Destination for recorded interactions.
#[async_trait]
pub trait InteractionSink: Send + Sync {
	fn name(&self) -> &str;

	async fn publish(&self, event: Arc<InteractionEvent>) -> Result<(), SinkError>;
}
