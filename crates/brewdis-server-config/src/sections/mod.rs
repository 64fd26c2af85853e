// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for brewdis-server.

pub mod fields;
pub mod http;
pub mod interactions;
pub mod inventory;
pub mod logging;
pub mod product;
pub mod redis;
pub mod reference;
pub mod stomp;
pub mod store;

pub use fields::{FieldsConfig, FieldsConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use interactions::{InteractionsConfig, InteractionsConfigLayer, QueueOverflowPolicy};
pub use inventory::{
	DistanceUnit, GeoRadius, InventoryConfig, InventoryConfigLayer, LevelThresholds,
	LevelThresholdsLayer,
};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use product::{DictionaryConfig, DictionaryConfigLayer, ProductConfig, ProductConfigLayer};
pub use redis::{RedisConfig, RedisConfigLayer};
pub use reference::{ReferenceConfig, ReferenceConfigLayer};
pub use stomp::{StompConfig, StompConfigLayer};
pub use store::{StoreConfig, StoreConfigLayer};
