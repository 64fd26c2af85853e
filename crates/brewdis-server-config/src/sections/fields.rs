// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document field names shared by the product, store and inventory indexes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldsConfigLayer {
	pub product_id: Option<String>,
	pub product_name: Option<String>,
	pub product_description: Option<String>,
	pub category_name: Option<String>,
	pub style_name: Option<String>,
	pub brewery_name: Option<String>,
	pub store_id: Option<String>,
	pub available_to_promise: Option<String>,
	pub location: Option<String>,
	pub level: Option<String>,
}

macro_rules! merge_fields {
	($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
		$(
			if $other.$field.is_some() {
				$self.$field = $other.$field;
			}
		)+
	};
}

impl FieldsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		merge_fields!(
			self,
			other,
			product_id,
			product_name,
			product_description,
			category_name,
			style_name,
			brewery_name,
			store_id,
			available_to_promise,
			location,
			level,
		);
	}

	pub fn finalize(self) -> FieldsConfig {
		let defaults = FieldsConfig::default();
		FieldsConfig {
			product_id: self.product_id.unwrap_or(defaults.product_id),
			product_name: self.product_name.unwrap_or(defaults.product_name),
			product_description: self
				.product_description
				.unwrap_or(defaults.product_description),
			category_name: self.category_name.unwrap_or(defaults.category_name),
			style_name: self.style_name.unwrap_or(defaults.style_name),
			brewery_name: self.brewery_name.unwrap_or(defaults.brewery_name),
			store_id: self.store_id.unwrap_or(defaults.store_id),
			available_to_promise: self
				.available_to_promise
				.unwrap_or(defaults.available_to_promise),
			location: self.location.unwrap_or(defaults.location),
			level: self.level.unwrap_or(defaults.level),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldsConfig {
	pub product_id: String,
	pub product_name: String,
	pub product_description: String,
	pub category_name: String,
	pub style_name: String,
	pub brewery_name: String,
	pub store_id: String,
	pub available_to_promise: String,
	/// Geo field shared by the store and inventory indexes.
	pub location: String,
	/// Derived field written by availability lookups, never stored.
	pub level: String,
}

impl Default for FieldsConfig {
	fn default() -> Self {
		Self {
			product_id: "sku".to_string(),
			product_name: "name".to_string(),
			product_description: "description".to_string(),
			category_name: "categoryName".to_string(),
			style_name: "styleName".to_string(),
			brewery_name: "breweryName".to_string(),
			store_id: "store".to_string(),
			available_to_promise: "availableToPromise".to_string(),
			location: "location".to_string(),
			level: "level".to_string(),
		}
	}
}

impl FieldsConfig {
	/// Fields wrapped in highlight tags on product search results.
	pub fn highlighted(&self) -> Vec<String> {
		vec![
			self.product_name.clone(),
			self.product_description.clone(),
			self.category_name.clone(),
			self.style_name.clone(),
			self.brewery_name.clone(),
		]
	}
}
