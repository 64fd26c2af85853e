// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use brewdis_server_config::QueueOverflowPolicy;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, instrument, warn};

use crate::event::InteractionEvent;
use crate::sink::InteractionSink;

/// Queues interaction events and fans them out to sinks in the background.
///
/// Recording never waits on a sink, and a failing sink only produces a
/// warning. `queue_capacity` bounds the queue, the events being published
/// and, under [`QueueOverflowPolicy::Block`], the events waiting for queue
/// space, so a stalled sink turns into dropped events rather than unbounded
/// tasks.
#[derive(Clone)]
pub struct InteractionRecorder {
	tx: Option<mpsc::Sender<InteractionEvent>>,
	overflow_policy: QueueOverflowPolicy,
	waiting: Arc<Semaphore>,
}

impl InteractionRecorder {
	/// Starts the background worker. Must be called within a tokio runtime.
	pub fn new(
		queue_capacity: usize,
		overflow_policy: QueueOverflowPolicy,
		sinks: Vec<Arc<dyn InteractionSink>>,
	) -> Self {
		let capacity = queue_capacity.max(1);
		let (tx, rx) = mpsc::channel(capacity);

		tokio::spawn(Self::background_task(
			rx,
			sinks,
			Arc::new(Semaphore::new(capacity)),
		));

		Self {
			tx: Some(tx),
			overflow_policy,
			waiting: Arc::new(Semaphore::new(capacity)),
		}
	}

	/// A recorder that drops every event.
	pub fn disabled() -> Self {
		Self {
			tx: None,
			overflow_policy: QueueOverflowPolicy::DropNewest,
			waiting: Arc::new(Semaphore::new(0)),
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.tx.is_some()
	}

	/// Publishes each event to every sink concurrently.
	///
	/// An event holds one `in_flight` permit until all of its publishes have
	/// finished; with no permit left the worker stops draining the queue.
	async fn background_task(
		mut rx: mpsc::Receiver<InteractionEvent>,
		sinks: Vec<Arc<dyn InteractionSink>>,
		in_flight: Arc<Semaphore>,
	) {
		loop {
			let Ok(permit) = Arc::clone(&in_flight).acquire_owned().await else {
				break;
			};
			let Some(event) = rx.recv().await else {
				break;
			};
			let event = Arc::new(event);
			let permit = Arc::new(permit);

			for sink in &sinks {
				let sink = Arc::clone(sink);
				let event = Arc::clone(&event);
				let permit = Arc::clone(&permit);

				tokio::spawn(async move {
					if let Err(e) = sink.publish(event).await {
						warn!(sink = sink.name(), error = %e, "interaction sink publish failed");
					}
					drop(permit);
				});
			}
		}
		debug!("interaction queue closed");
	}

	/// Records that `session` was shown `products` near `stores`.
	///
	/// Returns `true` if the event was queued, `false` if it was dropped.
	pub fn record(&self, session: &str, stores: Vec<String>, products: Vec<String>) -> bool {
		self.record_event(InteractionEvent::new(session, stores, products))
	}

	/// Queues an event without waiting.
	///
	/// # Overflow Policy Behavior
	///
	/// - `Block`: when the queue is full, a background task waits for space;
	///   once `queue_capacity` events are already waiting, the event is dropped
	/// - `DropNewest`: drops the event when the queue is full
	#[instrument(skip(self, event), fields(session = %event.session))]
	pub fn record_event(&self, event: InteractionEvent) -> bool {
		let Some(tx) = &self.tx else {
			return false;
		};
		let event = match tx.try_send(event) {
			Ok(()) => return true,
			Err(mpsc::error::TrySendError::Closed(_)) => {
				debug!("interaction recorder shut down, dropping event");
				return false;
			}
			Err(mpsc::error::TrySendError::Full(event)) => event,
		};

		match self.overflow_policy {
			QueueOverflowPolicy::Block => {
				let Ok(permit) = Arc::clone(&self.waiting).try_acquire_owned() else {
					warn!("interaction queue full and too many events waiting, dropping event");
					return false;
				};
				let tx = tx.clone();
				tokio::spawn(async move {
					if tx.send(event).await.is_err() {
						debug!("interaction recorder shut down, dropping event");
					}
					drop(permit);
				});
				true
			}
			QueueOverflowPolicy::DropNewest => {
				warn!("interaction queue full, dropping event");
				false
			}
		}
	}
}
