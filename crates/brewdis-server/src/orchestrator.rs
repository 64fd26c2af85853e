// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Composes query compilation, execution and post-processing per request type.

use std::sync::Arc;

use brewdis_server_config::{ServerConfig, StompConfig};
use brewdis_server_interactions::InteractionRecorder;
use brewdis_server_search::criteria::{GeoFilter, QueryExpression};
use brewdis_server_search::{
	BrewerySuggestion, RawResult, ResultAugmenter, ResultsPage, SearchCriteria, SearchExecutor,
	SearchOptions, SearchStore, SortBy, SortDirection, SuggestionService,
};
use tracing::{info, instrument};

use crate::error::ServerError;
use crate::reference::{Category, ReferenceData, Style};

/// Entry point for every read the API serves.
#[derive(Clone)]
pub struct QueryOrchestrator {
	config: Arc<ServerConfig>,
	executor: SearchExecutor,
	suggestions: SuggestionService,
	augmenter: ResultAugmenter,
	recorder: InteractionRecorder,
	reference: Arc<dyn ReferenceData>,
}

impl QueryOrchestrator {
	pub fn new(
		config: Arc<ServerConfig>,
		store: Arc<dyn SearchStore>,
		recorder: InteractionRecorder,
		reference: Arc<dyn ReferenceData>,
	) -> Self {
		let executor = SearchExecutor::new(Arc::clone(&store));
		let suggestions = SuggestionService::new(store, config.product.suggestion_limit);
		let augmenter = ResultAugmenter::from_config(&config.inventory, &config.fields);
		Self {
			config,
			executor,
			suggestions,
			augmenter,
			recorder,
			reference,
		}
	}

	pub fn config(&self) -> &ServerConfig {
		&self.config
	}

	fn geo_filter(
		&self,
		longitude: Option<f64>,
		latitude: Option<f64>,
	) -> Result<GeoFilter, ServerError> {
		let longitude = longitude.ok_or(ServerError::MissingParameter("longitude"))?;
		let latitude = latitude.ok_or(ServerError::MissingParameter("latitude"))?;
		Ok(GeoFilter::new(
			longitude,
			latitude,
			self.config.inventory.availability_radius,
		)?)
	}

	/// Full-text product search around a location.
	///
	/// The ids of the stores near the shopper and of the products on the page
	/// are handed to the interaction recorder without waiting.
	#[instrument(skip(self, criteria), fields(page_index = criteria.page_index, page_size = criteria.page_size))]
	pub async fn search_products(
		&self,
		session: &str,
		criteria: &SearchCriteria,
		longitude: Option<f64>,
		latitude: Option<f64>,
	) -> Result<ResultsPage, ServerError> {
		let geo = self.geo_filter(longitude, latitude)?;
		let offset = criteria.offset()?;
		let query = QueryExpression::new()
			.text(criteria.query.as_deref())?
			.build();

		info!(
			longitude = geo.longitude,
			latitude = geo.latitude,
			"Searching for products"
		);

		let product = &self.config.product;
		let fields = &self.config.fields;
		let options = SearchOptions::new(offset, criteria.page_size)
			.with_highlight(
				fields.highlighted(),
				product.highlight_open.clone(),
				product.highlight_close.clone(),
			)
			.with_sort(criteria.sort_by());
		let products = self
			.executor
			.execute(&product.index, &query, &options)
			.await?;

		let stores = self.nearby_stores(&geo).await?;
		let skus = field_values(&products.documents, &fields.product_id);
		self.recorder.record(session, stores, skus);

		Ok(ResultsPage {
			count: products.total,
			duration: products.duration_secs(),
			results: products.documents,
			page_index: criteria.page_index,
			page_size: criteria.page_size,
		})
	}

	async fn nearby_stores(&self, geo: &GeoFilter) -> Result<Vec<String>, ServerError> {
		let store = &self.config.store;
		let query = QueryExpression::new()
			.geo(&self.config.fields.location, geo)
			.build();
		let stores = self
			.executor
			.execute(
				&store.index,
				&query,
				&SearchOptions::new(0, store.search_limit),
			)
			.await?;
		Ok(field_values(&stores.documents, &self.config.fields.store_id))
	}

	/// Inventory with stock, optionally restricted to one store, ordered by store.
	#[instrument(skip(self))]
	pub async fn inventory(&self, store: Option<&str>) -> Result<Vec<RawResult>, ServerError> {
		let inventory = &self.config.inventory;
		let fields = &self.config.fields;
		let query = QueryExpression::new()
			.numeric_range(&fields.available_to_promise, Some(0.0), None)
			.optional_tag(&fields.store_id, store)
			.build();
		let options = SearchOptions::new(0, inventory.search_limit).with_sort(Some(SortBy::new(
			fields.store_id.clone(),
			SortDirection::Ascending,
		)));
		let executed = self
			.executor
			.execute(&inventory.index, &query, &options)
			.await?;
		Ok(executed.documents)
	}

	/// Inventory near a location, optionally for one product, with stock levels.
	#[instrument(skip(self))]
	pub async fn availability(
		&self,
		sku: Option<&str>,
		longitude: Option<f64>,
		latitude: Option<f64>,
	) -> Result<Vec<RawResult>, ServerError> {
		let geo = self.geo_filter(longitude, latitude)?;
		let inventory = &self.config.inventory;
		let fields = &self.config.fields;
		let query = QueryExpression::new()
			.geo(&fields.location, &geo)
			.optional_tag(&fields.product_id, sku)
			.build();
		info!(query = %query, "Searching for availability");

		let mut executed = self
			.executor
			.execute(
				&inventory.index,
				&query,
				&SearchOptions::new(0, inventory.search_limit),
			)
			.await?;
		self.augmenter.augment_all(&mut executed.documents);
		Ok(executed.documents)
	}

	pub async fn brewery_suggestions(
		&self,
		prefix: Option<&str>,
	) -> Result<Vec<BrewerySuggestion>, ServerError> {
		let dictionary = &self.config.product.brewery;
		Ok(self
			.suggestions
			.brewery_suggestions(&dictionary.index, prefix, dictionary.fuzzy)
			.await?)
	}

	pub async fn food_suggestions(&self, prefix: Option<&str>) -> Result<Vec<String>, ServerError> {
		let dictionary = &self.config.product.food_pairings;
		Ok(self
			.suggestions
			.plain_suggestions(&dictionary.index, prefix, dictionary.fuzzy)
			.await?)
	}

	pub fn categories(&self) -> Vec<Category> {
		self.reference.categories()
	}

	pub fn styles(&self, category: Option<&str>) -> Vec<Style> {
		let category = category.map(str::trim).unwrap_or_default();
		if category.is_empty() {
			return Vec::new();
		}
		self.reference.styles(category)
	}

	pub fn stomp(&self) -> &StompConfig {
		&self.config.stomp
	}

	pub fn interactions_enabled(&self) -> bool {
		self.recorder.is_enabled()
	}
}

fn field_values(documents: &[RawResult], field: &str) -> Vec<String> {
	documents
		.iter()
		.filter_map(|document| document.get(field))
		.map(str::to_string)
		.collect()
}
