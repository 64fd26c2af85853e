// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	FieldsConfigLayer, HttpConfigLayer, InteractionsConfigLayer, InventoryConfigLayer,
	LoggingConfigLayer, ProductConfigLayer, RedisConfigLayer, ReferenceConfigLayer,
	StompConfigLayer, StoreConfigLayer,
};

/// Server configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub redis: Option<RedisConfigLayer>,
	#[serde(default)]
	pub product: Option<ProductConfigLayer>,
	#[serde(default)]
	pub store: Option<StoreConfigLayer>,
	#[serde(default)]
	pub inventory: Option<InventoryConfigLayer>,
	#[serde(default)]
	pub fields: Option<FieldsConfigLayer>,
	#[serde(default)]
	pub interactions: Option<InteractionsConfigLayer>,
	#[serde(default)]
	pub reference: Option<ReferenceConfigLayer>,
	#[serde(default)]
	pub stomp: Option<StompConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_option(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_option(&mut self.redis, other.redis, RedisConfigLayer::merge);
		merge_option(&mut self.product, other.product, ProductConfigLayer::merge);
		merge_option(&mut self.store, other.store, StoreConfigLayer::merge);
		merge_option(
			&mut self.inventory,
			other.inventory,
			InventoryConfigLayer::merge,
		);
		merge_option(&mut self.fields, other.fields, FieldsConfigLayer::merge);
		merge_option(
			&mut self.interactions,
			other.interactions,
			InteractionsConfigLayer::merge,
		);
		merge_option(
			&mut self.reference,
			other.reference,
			ReferenceConfigLayer::merge,
		);
		merge_option(&mut self.stomp, other.stomp, StompConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
