// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Records which products a shopper session was shown.
//!
//! Search handlers hand events to an [`InteractionRecorder`], which queues
//! them and publishes to every configured [`InteractionSink`] off the
//! request path.

pub mod error;
pub mod event;
pub mod pipeline;
pub mod sink;

pub use error::SinkError;
pub use event::InteractionEvent;
pub use pipeline::InteractionRecorder;
pub use sink::InteractionSink;

pub use brewdis_server_config::{InteractionsConfig, QueueOverflowPolicy};

#[cfg(feature = "sink-tracing")]
pub use sink::tracing::TracingSink;

#[cfg(feature = "sink-redis-stream")]
pub use sink::redis_stream::RedisStreamSink;
