// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the Brewdis product discovery server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`BREWDIS_*`)
//!
//! # Usage
//!
//! ```ignore
//! use brewdis_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub redis: RedisConfig,
	pub product: ProductConfig,
	pub store: StoreConfig,
	pub inventory: InventoryConfig,
	pub fields: FieldsConfig,
	pub interactions: InteractionsConfig,
	pub reference: ReferenceConfig,
	pub stomp: StompConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`BREWDIS_*`)
/// 2. Config file (`/etc/brewdis/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let redis = layer.redis.unwrap_or_default().finalize();
	let product = layer.product.unwrap_or_default().finalize();
	let store = layer.store.unwrap_or_default().finalize();
	let inventory = layer.inventory.unwrap_or_default().finalize()?;
	let fields = layer.fields.unwrap_or_default().finalize();
	let interactions = layer.interactions.unwrap_or_default().finalize();
	let reference = layer.reference.unwrap_or_default().finalize();
	let stomp = layer.stomp.unwrap_or_default().finalize();

	validate_config(&product, &store)?;

	info!(
		host = %http.host,
		port = http.port,
		product_index = %product.index,
		store_index = %store.index,
		inventory_index = %inventory.index,
		availability_radius = %inventory.availability_radius,
		interactions_enabled = interactions.enabled,
		reference_data = reference.path.is_some(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		logging,
		redis,
		product,
		store,
		inventory,
		fields,
		interactions,
		reference,
		stomp,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(product: &ProductConfig, store: &StoreConfig) -> Result<(), ConfigError> {
	if product.suggestion_limit == 0 {
		return Err(ConfigError::Validation(
			"product.suggestion_limit must be greater than zero".to_string(),
		));
	}
	if store.search_limit == 0 {
		return Err(ConfigError::Validation(
			"store.search_limit must be greater than zero".to_string(),
		));
	}
	if product.brewery.index == product.food_pairings.index {
		return Err(ConfigError::Validation(format!(
			"brewery and food pairing suggestions share the dictionary '{}'",
			product.brewery.index
		)));
	}
	Ok(())
}
