// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! RediSearch client implementation.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Cmd, Value};
use tracing::{debug, error, instrument, trace};

use crate::error::StoreError;
use crate::store::SearchStore;
use crate::types::{RawResult, SearchOptions, SearchReply, SuggestOptions, SuggestionEntry};

/// [`SearchStore`] backed by a RediSearch server.
///
/// The connection manager multiplexes requests over one connection and
/// reconnects on failure, so clones share the same connection.
#[derive(Clone)]
pub struct RediSearchStore {
	connection: ConnectionManager,
}

impl std::fmt::Debug for RediSearchStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RediSearchStore").finish_non_exhaustive()
	}
}

impl RediSearchStore {
	/// Connects to the server at `url` (`redis://host:port`).
	pub async fn connect(url: &str) -> Result<Self, StoreError> {
		let client = redis::Client::open(url)?;
		let connection = ConnectionManager::new(client).await.map_err(|e| {
			error!(error = %e, "Failed to connect to Redis");
			StoreError::Redis(e)
		})?;
		debug!("Connected to Redis");
		Ok(Self { connection })
	}

	async fn query(&self, cmd: &Cmd) -> Result<Value, StoreError> {
		let mut connection = self.connection.clone();
		let value: Value = cmd.query_async(&mut connection).await.map_err(|e| {
			error!(error = %e, "Redis command failed");
			StoreError::Redis(e)
		})?;
		trace!(reply = ?value, "Redis reply");
		Ok(value)
	}
}

#[async_trait]
impl SearchStore for RediSearchStore {
	#[instrument(skip(self, options), fields(offset = options.limit.offset, num = options.limit.num))]
	async fn search(
		&self,
		index: &str,
		query: &str,
		options: &SearchOptions,
	) -> Result<SearchReply, StoreError> {
		let reply = self.query(&search_command(index, query, options)).await?;
		parse_search_reply(reply)
	}

	#[instrument(skip(self, options), fields(fuzzy = options.fuzzy, max = options.max))]
	async fn suggest(
		&self,
		dictionary: &str,
		prefix: &str,
		options: &SuggestOptions,
	) -> Result<Vec<SuggestionEntry>, StoreError> {
		let reply = self
			.query(&suggest_command(dictionary, prefix, options))
			.await?;
		parse_suggest_reply(reply)
	}

	async fn ping(&self) -> Result<(), StoreError> {
		let reply = self.query(&redis::cmd("PING")).await?;
		match reply {
			Value::SimpleString(pong) if pong.eq_ignore_ascii_case("PONG") => Ok(()),
			Value::Okay => Ok(()),
			other => Err(StoreError::UnexpectedReply(format!(
				"PING answered {other:?}"
			))),
		}
	}
}

/// `FT.SEARCH index query [HIGHLIGHT ...] [SORTBY ...] LIMIT offset num`
fn search_command(index: &str, query: &str, options: &SearchOptions) -> Cmd {
	let mut cmd = redis::cmd("FT.SEARCH");
	cmd.arg(index).arg(query);
	if let Some(highlight) = &options.highlight {
		cmd.arg("HIGHLIGHT");
		if !highlight.fields.is_empty() {
			cmd
				.arg("FIELDS")
				.arg(highlight.fields.len())
				.arg(&highlight.fields);
		}
		cmd.arg("TAGS").arg(&highlight.open).arg(&highlight.close);
	}
	if let Some(sort_by) = &options.sort_by {
		cmd
			.arg("SORTBY")
			.arg(&sort_by.field)
			.arg(sort_by.direction.as_keyword());
	}
	cmd
		.arg("LIMIT")
		.arg(options.limit.offset)
		.arg(options.limit.num);
	cmd
}

/// `FT.SUGGET dictionary prefix [FUZZY] WITHPAYLOADS MAX n`
fn suggest_command(dictionary: &str, prefix: &str, options: &SuggestOptions) -> Cmd {
	let mut cmd = redis::cmd("FT.SUGGET");
	cmd.arg(dictionary).arg(prefix);
	if options.fuzzy {
		cmd.arg("FUZZY");
	}
	cmd.arg("WITHPAYLOADS").arg("MAX").arg(options.max);
	cmd
}

/// Parses `[total, key1, [field, value, ...], key2, [...], ...]`.
fn parse_search_reply(reply: Value) -> Result<SearchReply, StoreError> {
	let Value::Array(items) = reply else {
		return Err(StoreError::UnexpectedReply(format!(
			"FT.SEARCH answered {reply:?}"
		)));
	};
	let mut items = items.into_iter();

	let total = match items.next() {
		Some(Value::Int(total)) => u64::try_from(total).map_err(|_| {
			StoreError::UnexpectedReply(format!("negative FT.SEARCH total {total}"))
		})?,
		other => {
			return Err(StoreError::UnexpectedReply(format!(
				"FT.SEARCH reply starts with {other:?}"
			)))
		}
	};

	let mut documents = Vec::new();
	while let Some(key) = items.next() {
		let mut document = RawResult::new(string_value(key)?);
		match items.next() {
			Some(Value::Array(pairs)) => {
				let mut pairs = pairs.into_iter();
				while let (Some(name), Some(value)) = (pairs.next(), pairs.next()) {
					document.insert(string_value(name)?, string_value(value)?);
				}
			}
			// Document expired between matching and loading.
			Some(Value::Nil) | None => {}
			Some(other) => {
				return Err(StoreError::UnexpectedReply(format!(
					"FT.SEARCH document fields were {other:?}"
				)))
			}
		}
		documents.push(document);
	}

	Ok(SearchReply { total, documents })
}

/// Parses `[string1, payload1, string2, payload2, ...]`.
fn parse_suggest_reply(reply: Value) -> Result<Vec<SuggestionEntry>, StoreError> {
	let items = match reply {
		Value::Array(items) => items,
		Value::Nil => return Ok(Vec::new()),
		other => {
			return Err(StoreError::UnexpectedReply(format!(
				"FT.SUGGET answered {other:?}"
			)))
		}
	};

	let mut entries = Vec::with_capacity(items.len() / 2);
	let mut items = items.into_iter();
	while let Some(string) = items.next() {
		let payload = match items.next() {
			Some(Value::BulkString(bytes)) => Some(bytes),
			Some(Value::SimpleString(s)) => Some(s.into_bytes()),
			Some(Value::Nil) | None => None,
			Some(other) => {
				return Err(StoreError::UnexpectedReply(format!(
					"FT.SUGGET payload was {other:?}"
				)))
			}
		};
		entries.push(SuggestionEntry::new(string_value(string)?, payload));
	}
	Ok(entries)
}

fn string_value(value: Value) -> Result<String, StoreError> {
	match value {
		Value::BulkString(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
		Value::SimpleString(s) => Ok(s),
		Value::Int(i) => Ok(i.to_string()),
		other => Err(StoreError::UnexpectedReply(format!(
			"expected a string, got {other:?}"
		))),
	}
}
