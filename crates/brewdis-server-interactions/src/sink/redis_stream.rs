// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appends interactions to a Redis stream for downstream consumers.

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Cmd;

use crate::error::SinkError;
use crate::event::InteractionEvent;
use crate::sink::InteractionSink;

pub struct RedisStreamSink {
	connection: ConnectionManager,
	stream: String,
}

impl RedisStreamSink {
	pub fn new(connection: ConnectionManager, stream: impl Into<String>) -> Self {
		Self {
			connection,
			stream: stream.into(),
		}
	}

	/// Opens a dedicated connection to `url`.
	pub async fn connect(url: &str, stream: impl Into<String>) -> Result<Self, SinkError> {
		let client = redis::Client::open(url)
			.map_err(|e| SinkError::Permanent(format!("invalid redis url: {e}")))?;
		let connection = ConnectionManager::new(client)
			.await
			.map_err(|e| SinkError::Transient(format!("failed to connect: {e}")))?;
		Ok(Self::new(connection, stream))
	}
}

/// `XADD stream * id .. timestamp .. session .. stores .. skus ..`
///
/// Lists are comma separated, preserving order.
pub fn xadd_command(stream: &str, event: &InteractionEvent) -> Cmd {
	let mut cmd = redis::cmd("XADD");
	cmd
		.arg(stream)
		.arg("*")
		.arg("id")
		.arg(event.id.to_string())
		.arg("timestamp")
		.arg(event.timestamp.timestamp_millis())
		.arg("session")
		.arg(&event.session)
		.arg("stores")
		.arg(event.stores.join(","))
		.arg("skus")
		.arg(event.products.join(","));
	cmd
}

#[async_trait]
impl InteractionSink for RedisStreamSink {
	fn name(&self) -> &str {
		"redis-stream"
	}

	async fn publish(&self, event: Arc<InteractionEvent>) -> Result<(), SinkError> {
		let mut connection = self.connection.clone();
		let _: redis::Value = xadd_command(&self.stream, &event)
			.query_async(&mut connection)
			.await
			.map_err(|e| SinkError::Transient(format!("XADD failed: {e}")))?;
		Ok(())
	}
}
