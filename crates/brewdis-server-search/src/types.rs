// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and result types shared by the search components.

use std::fmt;
use std::time::Duration;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::CriteriaError;

pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// RediSearch's default `MAXSEARCHRESULTS`; `LIMIT offset num` must stay within it.
pub const MAX_SEARCH_RESULTS: u64 = 10_000;

/// Sort order accepted from clients.
///
/// `ASC` and `DESC` are accepted as aliases of the long names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SortDirection {
	#[default]
	#[serde(alias = "ASC", alias = "asc", alias = "ascending")]
	Ascending,
	#[serde(alias = "DESC", alias = "desc", alias = "descending")]
	Descending,
}

impl SortDirection {
	/// Keyword used by `FT.SEARCH ... SORTBY`.
	pub fn as_keyword(&self) -> &'static str {
		match self {
			SortDirection::Ascending => "ASC",
			SortDirection::Descending => "DESC",
		}
	}
}

/// Product search criteria posted by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchCriteria {
	/// Free-text query; absent or blank means match everything.
	pub query: Option<String>,
	pub sort_by_field: Option<String>,
	pub sort_by_direction: SortDirection,
	/// Zero-based page number.
	pub page_index: u64,
	pub page_size: u64,
}

impl Default for SearchCriteria {
	fn default() -> Self {
		Self {
			query: None,
			sort_by_field: None,
			sort_by_direction: SortDirection::default(),
			page_index: 0,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}
}

impl SearchCriteria {
	/// Index of the first result on the requested page.
	///
	/// The page must end within [`MAX_SEARCH_RESULTS`].
	pub fn offset(&self) -> Result<u64, CriteriaError> {
		if self.page_size == 0 {
			return Err(CriteriaError::ZeroPageSize);
		}
		if self.page_size > MAX_SEARCH_RESULTS {
			return Err(CriteriaError::PageTooLarge {
				page_size: self.page_size,
				max: MAX_SEARCH_RESULTS,
			});
		}
		let overflow = CriteriaError::PaginationOverflow {
			page_index: self.page_index,
			page_size: self.page_size,
		};
		let offset = self
			.page_index
			.checked_mul(self.page_size)
			.ok_or_else(|| overflow.clone())?;
		match offset.checked_add(self.page_size) {
			Some(end) if end <= MAX_SEARCH_RESULTS => Ok(offset),
			_ => Err(overflow),
		}
	}

	/// Requested sort, ignoring a blank field name.
	pub fn sort_by(&self) -> Option<SortBy> {
		self
			.sort_by_field
			.as_deref()
			.map(str::trim)
			.filter(|field| !field.is_empty())
			.map(|field| SortBy::new(field, self.sort_by_direction))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
	pub fields: Vec<String>,
	pub open: String,
	pub close: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
	pub field: String,
	pub direction: SortDirection,
}

impl SortBy {
	pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
		Self {
			field: field.into(),
			direction,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
	pub offset: u64,
	pub num: u64,
}

/// Options applied by the store to a single `FT.SEARCH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
	pub highlight: Option<Highlight>,
	pub sort_by: Option<SortBy>,
	pub limit: Limit,
}

impl SearchOptions {
	pub fn new(offset: u64, num: u64) -> Self {
		Self {
			highlight: None,
			sort_by: None,
			limit: Limit { offset, num },
		}
	}

	pub fn with_highlight(
		mut self,
		fields: Vec<String>,
		open: impl Into<String>,
		close: impl Into<String>,
	) -> Self {
		self.highlight = Some(Highlight {
			fields,
			open: open.into(),
			close: close.into(),
		});
		self
	}

	pub fn with_sort(mut self, sort_by: Option<SortBy>) -> Self {
		self.sort_by = sort_by;
		self
	}
}

/// A document returned by the store.
///
/// Fields keep the order in which the store returned them. The document key
/// is not part of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
	key: String,
	fields: Vec<(String, String)>,
}

impl RawResult {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			fields: Vec::new(),
		}
	}

	pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self
			.fields
			.iter()
			.find(|(field, _)| field == name)
			.map(|(_, value)| value.as_str())
	}

	/// Sets a field, replacing an existing value in place.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.fields.iter_mut().find(|(field, _)| *field == name) {
			Some((_, existing)) => *existing = value,
			None => self.fields.push((name, value)),
		}
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
		self
			.fields
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl Serialize for RawResult {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.fields.len()))?;
		for (name, value) in &self.fields {
			map.serialize_entry(name, value)?;
		}
		map.end()
	}
}

#[cfg(feature = "openapi")]
impl utoipa::PartialSchema for RawResult {
	fn schema() -> utoipa::openapi::RefOr<utoipa::openapi::schema::Schema> {
		utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(
			utoipa::openapi::schema::ObjectBuilder::new()
				.description(Some("Document fields as returned by the index"))
				.additional_properties(Some(
					utoipa::openapi::schema::AdditionalProperties::<
						utoipa::openapi::schema::Schema,
					>::FreeForm(true),
				))
				.build(),
		))
	}
}

#[cfg(feature = "openapi")]
impl utoipa::ToSchema for RawResult {}

/// Total match count plus the documents of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReply {
	pub total: u64,
	pub documents: Vec<RawResult>,
}

/// A search reply together with the time the store took to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
	pub total: u64,
	pub documents: Vec<RawResult>,
	pub elapsed: Duration,
}

impl Executed {
	pub fn duration_secs(&self) -> f32 {
		self.elapsed.as_secs_f32()
	}
}

/// Paginated product search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResultsPage {
	/// Total number of matches, independent of the page size.
	pub count: u64,
	pub results: Vec<RawResult>,
	/// Store latency in seconds.
	pub duration: f32,
	pub page_index: u64,
	pub page_size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestOptions {
	pub fuzzy: bool,
	pub max: u32,
}

/// One `FT.SUGGET` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionEntry {
	pub string: String,
	pub payload: Option<Vec<u8>>,
}

impl SuggestionEntry {
	pub fn new(string: impl Into<String>, payload: Option<Vec<u8>>) -> Self {
		Self {
			string: string.into(),
			payload,
		}
	}
}

/// JSON payload stored alongside brewery suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BrewerySuggestionPayload {
	pub id: Option<String>,
	pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BrewerySuggestion {
	pub id: Option<String>,
	pub name: String,
	pub icon: Option<String>,
}

/// Stock level bucket derived from the available-to-promise quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AvailabilityLevel {
	None,
	Low,
	Medium,
	High,
}

impl AvailabilityLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			AvailabilityLevel::None => "none",
			AvailabilityLevel::Low => "low",
			AvailabilityLevel::Medium => "medium",
			AvailabilityLevel::High => "high",
		}
	}
}

impl fmt::Display for AvailabilityLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
