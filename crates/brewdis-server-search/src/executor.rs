// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Timed query execution.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::SearchStore;
use crate::types::{Executed, SearchOptions};

/// Runs compiled queries against the store and measures their latency.
#[derive(Clone)]
pub struct SearchExecutor {
	store: Arc<dyn SearchStore>,
}

impl SearchExecutor {
	pub fn new(store: Arc<dyn SearchStore>) -> Self {
		Self { store }
	}

	/// Executes `query` against `index`.
	///
	/// Pagination, sorting and highlighting are applied by the store. Errors
	/// are returned unchanged and never retried.
	pub async fn execute(
		&self,
		index: &str,
		query: &str,
		options: &SearchOptions,
	) -> Result<Executed, StoreError> {
		let start = Instant::now();
		let reply = self.store.search(index, query, options).await;
		let elapsed = start.elapsed();

		let reply = reply.map_err(|e| {
			warn!(index, query, error = %e, "Search failed");
			e
		})?;

		debug!(
			index,
			query,
			total = reply.total,
			returned = reply.documents.len(),
			elapsed_ms = elapsed.as_secs_f64() * 1000.0,
			"Search executed"
		);

		Ok(Executed {
			total: reply.total,
			documents: reply.documents,
			elapsed,
		})
	}
}
