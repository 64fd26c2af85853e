// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	DictionaryConfigLayer, HttpConfigLayer, InteractionsConfigLayer, InventoryConfigLayer,
	LevelThresholdsLayer, LoggingConfigLayer, ProductConfigLayer, QueueOverflowPolicy,
	RedisConfigLayer, ReferenceConfigLayer, StompConfigLayer, StoreConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/brewdis/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: BREWDIS_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			logging: Some(LoggingConfigLayer {
				level: env_var("BREWDIS_LOG_LEVEL"),
			}),
			redis: Some(RedisConfigLayer {
				url: env_var("BREWDIS_REDIS_URL"),
			}),
			product: Some(load_product_from_env()?),
			store: Some(StoreConfigLayer {
				index: env_var("BREWDIS_STORE_INDEX"),
				search_limit: env_parse("BREWDIS_STORE_SEARCH_LIMIT")?,
			}),
			inventory: Some(load_inventory_from_env()?),
			fields: None,
			interactions: Some(load_interactions_from_env()?),
			reference: Some(ReferenceConfigLayer {
				path: env_var("BREWDIS_REFERENCE_PATH"),
			}),
			stomp: Some(load_stomp_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn parse_bool(value: &str) -> bool {
	value.eq_ignore_ascii_case("true") || value == "1"
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| parse_bool(&v))
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
	value.parse().map_err(|_| ConfigError::InvalidValue {
		key: name.to_string(),
		message: format!("invalid value '{value}'"),
	})
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
	env_var(name).map(|v| parse_value(name, &v)).transpose()
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("BREWDIS_HOST"),
		port: env_parse("BREWDIS_PORT")?,
	})
}

fn load_product_from_env() -> Result<ProductConfigLayer, ConfigError> {
	Ok(ProductConfigLayer {
		index: env_var("BREWDIS_PRODUCT_INDEX"),
		highlight_open: env_var("BREWDIS_PRODUCT_HIGHLIGHT_OPEN"),
		highlight_close: env_var("BREWDIS_PRODUCT_HIGHLIGHT_CLOSE"),
		suggestion_limit: env_parse("BREWDIS_PRODUCT_SUGGESTION_LIMIT")?,
		brewery: Some(DictionaryConfigLayer {
			index: env_var("BREWDIS_BREWERY_INDEX"),
			fuzzy: env_bool("BREWDIS_BREWERY_FUZZY"),
		}),
		food_pairings: Some(DictionaryConfigLayer {
			index: env_var("BREWDIS_FOOD_PAIRINGS_INDEX"),
			fuzzy: env_bool("BREWDIS_FOOD_PAIRINGS_FUZZY"),
		}),
	})
}

fn load_inventory_from_env() -> Result<InventoryConfigLayer, ConfigError> {
	Ok(InventoryConfigLayer {
		index: env_var("BREWDIS_INVENTORY_INDEX"),
		search_limit: env_parse("BREWDIS_INVENTORY_SEARCH_LIMIT")?,
		availability_radius: env_var("BREWDIS_AVAILABILITY_RADIUS"),
		levels: Some(LevelThresholdsLayer {
			low: env_parse("BREWDIS_LEVEL_LOW")?,
			medium: env_parse("BREWDIS_LEVEL_MEDIUM")?,
			high: env_parse("BREWDIS_LEVEL_HIGH")?,
		}),
	})
}

fn load_interactions_from_env() -> Result<InteractionsConfigLayer, ConfigError> {
	let queue_overflow_policy = env_var("BREWDIS_INTERACTIONS_OVERFLOW_POLICY")
		.map(|v| {
			v.parse::<QueueOverflowPolicy>()
				.map_err(|message| ConfigError::invalid("BREWDIS_INTERACTIONS_OVERFLOW_POLICY", message))
		})
		.transpose()?;

	Ok(InteractionsConfigLayer {
		enabled: env_bool("BREWDIS_INTERACTIONS_ENABLED"),
		queue_capacity: env_parse("BREWDIS_INTERACTIONS_QUEUE_CAPACITY")?,
		queue_overflow_policy,
		stream: env_var("BREWDIS_INTERACTIONS_STREAM"),
	})
}

fn load_stomp_from_env() -> Result<StompConfigLayer, ConfigError> {
	Ok(StompConfigLayer {
		protocol: env_var("BREWDIS_STOMP_PROTOCOL"),
		host: env_var("BREWDIS_STOMP_HOST"),
		port: env_parse("BREWDIS_STOMP_PORT")?,
		endpoint: env_var("BREWDIS_STOMP_ENDPOINT"),
		destination_prefix: env_var("BREWDIS_STOMP_DESTINATION_PREFIX"),
		inventory_topic: env_var("BREWDIS_STOMP_INVENTORY_TOPIC"),
	})
}
