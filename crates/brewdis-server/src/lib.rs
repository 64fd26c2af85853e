// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Brewdis product discovery server.
//!
//! Translates shopper requests into RediSearch queries, post-processes the
//! replies and serves them over HTTP.

pub mod api;
pub mod api_docs;
pub mod error;
pub mod health;
pub mod orchestrator;
pub mod reference;
pub mod routes;
pub mod session;

pub use api::{create_app_state, create_recorder, create_router, load_reference, AppState};
pub use api_docs::ApiDoc;
pub use brewdis_server_config::ServerConfig;
pub use error::ServerError;
pub use orchestrator::QueryOrchestrator;
pub use reference::{Category, ReferenceCatalog, ReferenceData, Style};
pub use session::{Session, SESSION_COOKIE_NAME};
