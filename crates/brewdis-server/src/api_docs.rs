// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for brewdis-server.
//!
//! The interactive documentation is served at `/swagger-ui` and the raw JSON
//! at `/api-docs/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Brewdis API",
        version = "1.0.0",
        description = "Beer product discovery over RediSearch: product search, store inventory, availability, autocomplete and reference data.",
        license(name = "Proprietary")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "products", description = "Full-text product search near the shopper"),
        (name = "inventory", description = "Store inventory and availability levels"),
        (name = "suggestions", description = "Brewery and food pairing autocomplete"),
        (name = "reference", description = "Beer categories and styles"),
        (name = "config", description = "Client configuration"),
        (name = "health", description = "Health checks")
    ),
    paths(
        crate::routes::products::search_products,
        crate::routes::inventory::list_inventory,
        crate::routes::availability::availability,
        crate::routes::suggestions::suggest_breweries,
        crate::routes::suggestions::suggest_foods,
        crate::routes::reference::list_categories,
        crate::routes::reference::list_styles,
        crate::routes::config::stomp_config,
        crate::routes::health::health_check,
    ),
    components(schemas(
        brewdis_server_search::SearchCriteria,
        brewdis_server_search::SortDirection,
        brewdis_server_search::ResultsPage,
        brewdis_server_search::RawResult,
        brewdis_server_search::BrewerySuggestion,
        crate::reference::Category,
        crate::reference::Style,
        crate::routes::config::StompSettings,
        crate::health::HealthResponse,
        crate::health::HealthStatus,
        crate::error::ErrorResponse,
    ))
)]
pub struct ApiDoc;
