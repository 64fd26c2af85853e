// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Brewdis product discovery server binary.

use std::path::PathBuf;
use std::sync::Arc;

use brewdis_server::{create_app_state, create_recorder, create_router, load_reference};
use brewdis_server_search::RediSearchStore;
use clap::{Parser, Subcommand};
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Brewdis server - product discovery over RediSearch.
#[derive(Parser, Debug)]
#[command(name = "brewdis-server", about = "Brewdis product discovery server", version)]
struct Args {
	/// Configuration file (defaults to /etc/brewdis/server.toml)
	#[arg(long, env = "BREWDIS_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => brewdis_server_config::load_config_with_file(path.clone())?,
		None => brewdis_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		redis = %config.redis.url,
		"starting brewdis-server"
	);

	let store = Arc::new(RediSearchStore::connect(&config.redis.url).await?);
	let recorder = create_recorder(&config).await;
	let reference = load_reference(&config)?;

	let addr = config.socket_addr();
	let state = create_app_state(Arc::new(config), store, recorder, reference);

	let app = create_router(state).layer(TraceLayer::new_for_http()).layer(
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any),
	);

	let listener = tokio::net::TcpListener::bind(&addr).await?;
	tracing::info!(%addr, "listening");

	tokio::select! {
		result = axum::serve(listener, app) => {
			result?;
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("shutting down");
		}
	}

	Ok(())
}
