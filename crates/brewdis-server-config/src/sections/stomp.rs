// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! STOMP/websocket settings handed to the front-end for live inventory updates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StompConfigLayer {
	pub protocol: Option<String>,
	pub host: Option<String>,
	pub port: Option<u16>,
	pub endpoint: Option<String>,
	pub destination_prefix: Option<String>,
	pub inventory_topic: Option<String>,
}

impl StompConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.protocol.is_some() {
			self.protocol = other.protocol;
		}
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
		if other.endpoint.is_some() {
			self.endpoint = other.endpoint;
		}
		if other.destination_prefix.is_some() {
			self.destination_prefix = other.destination_prefix;
		}
		if other.inventory_topic.is_some() {
			self.inventory_topic = other.inventory_topic;
		}
	}

	pub fn finalize(self) -> StompConfig {
		let destination_prefix = self
			.destination_prefix
			.unwrap_or_else(|| "/topic".to_string());
		let inventory_topic = self
			.inventory_topic
			.unwrap_or_else(|| format!("{destination_prefix}/inventory"));
		StompConfig {
			protocol: self.protocol.unwrap_or_else(|| "ws".to_string()),
			host: self.host.unwrap_or_else(|| "localhost".to_string()),
			port: self.port.unwrap_or(8080),
			endpoint: self.endpoint.unwrap_or_else(|| "/websocket".to_string()),
			destination_prefix,
			inventory_topic,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StompConfig {
	pub protocol: String,
	pub host: String,
	pub port: u16,
	pub endpoint: String,
	pub destination_prefix: String,
	pub inventory_topic: String,
}

impl Default for StompConfig {
	fn default() -> Self {
		StompConfigLayer::default().finalize()
	}
}
