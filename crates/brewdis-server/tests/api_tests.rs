// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for the HTTP surface.
//!
//! Routes run against an in-memory store that records every query it is
//! asked, so tests can assert on both the response and the compiled query.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{header, Request, StatusCode},
	Router,
};
use brewdis_server::{create_app_state, create_router, ReferenceCatalog, ServerConfig};
use brewdis_server::{Category, Style};
use brewdis_server_interactions::{
	InteractionEvent, InteractionRecorder, InteractionSink, QueueOverflowPolicy, SinkError,
};
use brewdis_server_search::{
	RawResult, SearchOptions, SearchReply, SearchStore, SortDirection, StoreError,
	SuggestOptions, SuggestionEntry,
};
use tower::ServiceExt;

#[derive(Debug, Clone)]
struct SearchCall {
	index: String,
	query: String,
	options: SearchOptions,
}

#[derive(Default)]
struct FakeStore {
	replies: HashMap<String, SearchReply>,
	suggestions: HashMap<String, Vec<SuggestionEntry>>,
	down: bool,
	searches: Mutex<Vec<SearchCall>>,
	suggests: Mutex<Vec<(String, String, SuggestOptions)>>,
}

impl FakeStore {
	fn with_reply(mut self, index: &str, reply: SearchReply) -> Self {
		self.replies.insert(index.to_string(), reply);
		self
	}

	fn with_suggestions(mut self, dictionary: &str, entries: Vec<SuggestionEntry>) -> Self {
		self.suggestions.insert(dictionary.to_string(), entries);
		self
	}

	fn down() -> Self {
		Self {
			down: true,
			..Default::default()
		}
	}

	fn searches(&self) -> Vec<SearchCall> {
		self.searches.lock().unwrap().clone()
	}

	fn search_on(&self, index: &str) -> SearchCall {
		self
			.searches()
			.into_iter()
			.find(|call| call.index == index)
			.unwrap_or_else(|| panic!("no search on {index}"))
	}
}

#[async_trait]
impl SearchStore for FakeStore {
	async fn search(
		&self,
		index: &str,
		query: &str,
		options: &SearchOptions,
	) -> Result<SearchReply, StoreError> {
		if self.down {
			return Err(StoreError::UnexpectedReply("connection refused".to_string()));
		}
		self.searches.lock().unwrap().push(SearchCall {
			index: index.to_string(),
			query: query.to_string(),
			options: options.clone(),
		});
		Ok(self.replies.get(index).cloned().unwrap_or_default())
	}

	async fn suggest(
		&self,
		dictionary: &str,
		prefix: &str,
		options: &SuggestOptions,
	) -> Result<Vec<SuggestionEntry>, StoreError> {
		if self.down {
			return Err(StoreError::UnexpectedReply("connection refused".to_string()));
		}
		self
			.suggests
			.lock()
			.unwrap()
			.push((dictionary.to_string(), prefix.to_string(), *options));
		Ok(self.suggestions.get(dictionary).cloned().unwrap_or_default())
	}

	async fn ping(&self) -> Result<(), StoreError> {
		if self.down {
			Err(StoreError::UnexpectedReply("connection refused".to_string()))
		} else {
			Ok(())
		}
	}
}

#[derive(Default)]
struct CaptureSink {
	events: Mutex<Vec<Arc<InteractionEvent>>>,
}

#[async_trait]
impl InteractionSink for CaptureSink {
	fn name(&self) -> &str {
		"capture"
	}

	async fn publish(&self, event: Arc<InteractionEvent>) -> Result<(), SinkError> {
		self.events.lock().unwrap().push(event);
		Ok(())
	}
}

impl CaptureSink {
	async fn wait_for_events(&self, count: usize) -> Vec<Arc<InteractionEvent>> {
		for _ in 0..100 {
			let events = self.events.lock().unwrap().clone();
			if events.len() >= count {
				return events;
			}
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
		panic!("expected {count} interaction events");
	}
}

fn reference() -> ReferenceCatalog {
	let mut styles = HashMap::new();
	styles.insert(
		"3".to_string(),
		vec![Style {
			id: "30".to_string(),
			name: "American-Style India Pale Ale".to_string(),
		}],
	);
	ReferenceCatalog::new(
		vec![Category {
			id: "3".to_string(),
			name: "North American Ale".to_string(),
		}],
		styles,
	)
}

fn app_with(store: Arc<FakeStore>, recorder: InteractionRecorder) -> Router {
	let state = create_app_state(
		Arc::new(ServerConfig::default()),
		store,
		recorder,
		Arc::new(reference()),
	);
	create_router(state)
}

fn app(store: Arc<FakeStore>) -> Router {
	app_with(store, InteractionRecorder::disabled())
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
	let response = app
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap();
	let status = response.status();
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	(status, serde_json::from_slice(&body).unwrap())
}

fn post_products(uri: &str, body: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body.to_string()))
		.unwrap()
}

fn product(sku: &str, name: &str) -> RawResult {
	RawResult::new(format!("product:{sku}"))
		.with_field("sku", sku)
		.with_field("name", name)
}

// ============================================================================
// Product search
// ============================================================================

#[tokio::test]
async fn test_product_search_returns_page_and_sets_session() {
	let store = Arc::new(
		FakeStore::default()
			.with_reply(
				"products",
				SearchReply {
					total: 57,
					documents: vec![
						product("IPA-001", "<mark>IPA</mark> One"),
						product("IPA-002", "Hazy <mark>IPA</mark>"),
					],
				},
			)
			.with_reply(
				"stores",
				SearchReply {
					total: 2,
					documents: vec![
						RawResult::new("store:1").with_field("store", "1"),
						RawResult::new("store:7").with_field("store", "7"),
					],
				},
			),
	);
	let sink = Arc::new(CaptureSink::default());
	let recorder = InteractionRecorder::new(
		16,
		QueueOverflowPolicy::DropNewest,
		vec![sink.clone() as Arc<dyn InteractionSink>],
	);
	let app = app_with(store.clone(), recorder);

	let response = app
		.oneshot(post_products(
			"/api/products?longitude=-122.4&latitude=37.7",
			serde_json::json!({"query": "ipa", "pageIndex": 0, "pageSize": 10}),
		))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let cookie = response
		.headers()
		.get(header::SET_COOKIE)
		.expect("new session sets a cookie")
		.to_str()
		.unwrap()
		.to_string();
	assert!(cookie.starts_with("BREWDIS_SESSION="));

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let page: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(page["count"], 57);
	assert_eq!(page["pageIndex"], 0);
	assert_eq!(page["pageSize"], 10);
	assert_eq!(page["results"].as_array().unwrap().len(), 2);
	assert_eq!(page["results"][0]["sku"], "IPA-001");
	assert!(page["duration"].as_f64().unwrap() >= 0.0);

	let search = store.search_on("products");
	assert_eq!(search.query, "ipa");
	assert_eq!(search.options.limit.offset, 0);
	assert_eq!(search.options.limit.num, 10);
	let highlight = search.options.highlight.expect("product search highlights");
	assert_eq!(highlight.open, "<mark>");
	assert_eq!(highlight.close, "</mark>");

	let stores = store.search_on("stores");
	assert_eq!(stores.query, "@location:[-122.4 37.7 25 mi]");
	assert_eq!(stores.options.limit.num, 10);

	let events = sink.wait_for_events(1).await;
	let session = cookie
		.trim_start_matches("BREWDIS_SESSION=")
		.split(';')
		.next()
		.unwrap();
	assert_eq!(events[0].session, session);
	assert_eq!(events[0].stores, vec!["1", "7"]);
	assert_eq!(events[0].products, vec!["IPA-001", "IPA-002"]);
}

#[tokio::test]
async fn test_product_search_reuses_existing_session() {
	let store = Arc::new(FakeStore::default());
	let request = Request::builder()
		.method("POST")
		.uri("/api/products?longitude=-122.4&latitude=37.7")
		.header(header::CONTENT_TYPE, "application/json")
		.header(header::COOKIE, "BREWDIS_SESSION=returning-shopper")
		.body(Body::from(r#"{"query":"stout"}"#))
		.unwrap();

	let response = app(store).oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_product_search_pages_and_sorts() {
	let store = Arc::new(FakeStore::default());
	let response = app(store.clone())
		.oneshot(post_products(
			"/api/products?longitude=-122.4&latitude=37.7",
			serde_json::json!({
				"query": "",
				"sortByField": "abv",
				"sortByDirection": "Descending",
				"pageIndex": 3,
				"pageSize": 25
			}),
		))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);

	let search = store.search_on("products");
	assert_eq!(search.query, "*");
	assert_eq!(search.options.limit.offset, 75);
	assert_eq!(search.options.limit.num, 25);
	let sort = search.options.sort_by.expect("sort requested");
	assert_eq!(sort.field, "abv");
	assert_eq!(sort.direction, SortDirection::Descending);
}

#[tokio::test]
async fn test_product_search_requires_location() {
	let store = Arc::new(FakeStore::default());
	let response = app(store.clone())
		.oneshot(post_products(
			"/api/products?latitude=37.7",
			serde_json::json!({"query": "ipa"}),
		))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(body["error"], "bad_request");
	assert!(body["message"].as_str().unwrap().contains("longitude"));
	assert!(store.searches().is_empty());
}

#[tokio::test]
async fn test_product_search_rejects_invalid_criteria() {
	let store = Arc::new(FakeStore::default());
	for body in [
		serde_json::json!({"query": "(ipa"}),
		serde_json::json!({"query": "ipa", "pageSize": 0}),
		serde_json::json!({"query": "ipa\\"}),
		serde_json::json!({"query": "ipa", "pageSize": 10_000_000}),
		serde_json::json!({"query": "ipa", "pageIndex": 100, "pageSize": 100}),
	] {
		let response = app(store.clone())
			.oneshot(post_products(
				"/api/products?longitude=-122.4&latitude=37.7",
				body,
			))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	let response = app(store.clone())
		.oneshot(post_products(
			"/api/products?longitude=-200&latitude=37.7",
			serde_json::json!({"query": "ipa"}),
		))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert!(store.searches().is_empty());
}

#[tokio::test]
async fn test_product_search_rejects_malformed_body() {
	let store = Arc::new(FakeStore::default());
	let request = Request::builder()
		.method("POST")
		.uri("/api/products?longitude=-122.4&latitude=37.7")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{not json"))
		.unwrap();
	let response = app(store).oneshot(request).await.unwrap();
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
	let store = Arc::new(FakeStore::down());
	let response = app(store)
		.oneshot(post_products(
			"/api/products?longitude=-122.4&latitude=37.7",
			serde_json::json!({"query": "ipa"}),
		))
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(body["error"], "store_error");
}

// ============================================================================
// Inventory and availability
// ============================================================================

#[tokio::test]
async fn test_inventory_without_store_lists_stocked_items() {
	let store = Arc::new(FakeStore::default().with_reply(
		"inventory",
		SearchReply {
			total: 1,
			documents: vec![RawResult::new("inventory:1:IPA-001")
				.with_field("store", "1")
				.with_field("sku", "IPA-001")
				.with_field("availableToPromise", "12")],
		},
	));

	let (status, body) = get(app(store.clone()), "/api/inventory").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body[0]["availableToPromise"], "12");

	let search = store.search_on("inventory");
	assert_eq!(search.query, "@availableToPromise:[0 inf]");
	assert_eq!(search.options.limit.offset, 0);
	assert_eq!(search.options.limit.num, 1000);
	let sort = search.options.sort_by.expect("inventory is sorted by store");
	assert_eq!(sort.field, "store");
	assert_eq!(sort.direction, SortDirection::Ascending);
}

#[tokio::test]
async fn test_inventory_for_one_store() {
	let store = Arc::new(FakeStore::default());
	let (status, body) = get(app(store.clone()), "/api/inventory?store=42").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!([]));
	assert_eq!(
		store.search_on("inventory").query,
		"@availableToPromise:[0 inf] @store:{42}"
	);
}

#[tokio::test]
async fn test_availability_adds_levels() {
	let store = Arc::new(FakeStore::default().with_reply(
		"inventory",
		SearchReply {
			total: 3,
			documents: vec![
				RawResult::new("inventory:1:IPA-001").with_field("availableToPromise", "0"),
				RawResult::new("inventory:2:IPA-001").with_field("availableToPromise", "15"),
				RawResult::new("inventory:3:IPA-001").with_field("availableToPromise", "80"),
			],
		},
	));

	let (status, body) = get(
		app(store.clone()),
		"/api/availability?sku=IPA-001&longitude=-122.4&latitude=37.7",
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	let levels: Vec<&str> = body
		.as_array()
		.unwrap()
		.iter()
		.map(|doc| doc["level"].as_str().unwrap())
		.collect();
	assert_eq!(levels, vec!["none", "medium", "high"]);

	assert_eq!(
		store.search_on("inventory").query,
		"@location:[-122.4 37.7 25 mi] @sku:{IPA\\-001}"
	);
}

#[tokio::test]
async fn test_availability_requires_location() {
	let store = Arc::new(FakeStore::default());
	let (status, body) = get(app(store.clone()), "/api/availability?sku=IPA-001&longitude=-122.4").await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["message"].as_str().unwrap().contains("latitude"));
	assert!(store.searches().is_empty());
}

#[tokio::test]
async fn test_availability_rejects_non_numeric_location() {
	let store = Arc::new(FakeStore::default());
	let (status, body) = get(
		app(store),
		"/api/availability?longitude=west&latitude=37.7",
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "bad_request");
}

// ============================================================================
// Suggestions
// ============================================================================

#[tokio::test]
async fn test_brewery_suggestions_decode_payloads() {
	let store = Arc::new(FakeStore::default().with_suggestions(
		"breweries",
		vec![
			SuggestionEntry::new(
				"Stone Brewing",
				Some(br#"{"id":"b1","icon":"stone.png"}"#.to_vec()),
			),
			SuggestionEntry::new("Stoudts", Some(b"not json".to_vec())),
		],
	));

	let (status, body) = get(app(store.clone()), "/api/breweries?prefix=Sto").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body,
		serde_json::json!([
			{"id": "b1", "name": "Stone Brewing", "icon": "stone.png"},
			{"id": null, "name": "Stoudts", "icon": null}
		])
	);

	let suggests = store.suggests.lock().unwrap().clone();
	assert_eq!(suggests.len(), 1);
	let (dictionary, prefix, options) = &suggests[0];
	assert_eq!(dictionary, "breweries");
	assert_eq!(prefix, "Sto");
	assert!(options.fuzzy);
	assert_eq!(options.max, 20);
}

#[tokio::test]
async fn test_food_suggestions_are_plain_strings() {
	let store = Arc::new(FakeStore::default().with_suggestions(
		"foods",
		vec![
			SuggestionEntry::new("Pizza", None),
			SuggestionEntry::new("Pulled pork", Some(b"ignored".to_vec())),
		],
	));

	let (status, body) = get(app(store.clone()), "/api/foods?prefix=P").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!(["Pizza", "Pulled pork"]));

	let suggests = store.suggests.lock().unwrap().clone();
	assert!(!suggests[0].2.fuzzy);
}

#[tokio::test]
async fn test_suggestions_without_prefix_use_empty_prefix() {
	let store = Arc::new(FakeStore::default());
	let (status, body) = get(app(store.clone()), "/api/foods").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!([]));
	assert_eq!(store.suggests.lock().unwrap()[0].1, "");
}

// ============================================================================
// Reference data and client config
// ============================================================================

#[tokio::test]
async fn test_categories_and_styles() {
	let store = Arc::new(FakeStore::default());

	let (status, body) = get(app(store.clone()), "/api/categories").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!([{"id": "3", "name": "North American Ale"}]));

	let (status, body) = get(app(store.clone()), "/api/styles?category=3").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body[0]["name"], "American-Style India Pale Ale");

	let (status, body) = get(app(store.clone()), "/api/styles?category=99").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!([]));

	let (status, body) = get(app(store.clone()), "/api/styles").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, serde_json::json!([]));

	assert!(store.searches().is_empty());
}

#[tokio::test]
async fn test_stomp_config() {
	let (status, body) = get(app(Arc::new(FakeStore::default())), "/api/config/stomp").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["protocol"], "ws");
	assert_eq!(body["endpoint"], "/websocket");
	assert_eq!(body["destinationPrefix"], "/topic");
	assert_eq!(body["inventoryTopic"], "/topic/inventory");
}

// ============================================================================
// Health and documentation
// ============================================================================

#[tokio::test]
async fn test_health_degraded_without_recorder() {
	let (status, body) = get(app(Arc::new(FakeStore::default())), "/health").await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["status"], "degraded");
	assert_eq!(body["components"]["store"]["status"], "healthy");
	assert_eq!(body["components"]["interactions"]["enabled"], false);
}

#[tokio::test]
async fn test_health_unhealthy_when_store_down() {
	let (status, body) = get(app(Arc::new(FakeStore::down())), "/health").await;
	assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
	assert_eq!(body["status"], "unhealthy");
	assert!(body["components"]["store"]["error"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
	let (status, body) = get(app(Arc::new(FakeStore::default())), "/api-docs/openapi.json").await;
	assert_eq!(status, StatusCode::OK);
	assert!(body["paths"]["/api/products"]["post"].is_object());
	assert!(body["paths"]["/api/availability"]["get"].is_object());
}
