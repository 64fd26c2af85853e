// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiles structured criteria into RediSearch query expressions.
//!
//! Fragments follow the RediSearch query syntax:
//!
//! - tag equality: `@field:{value}`
//! - numeric range: `@field:[min max]`, open bounds as `-inf` / `inf`
//! - geo radius: `@field:[lon lat radius unit]`
//!
//! Fragments are joined with single spaces, which RediSearch treats as an
//! implicit AND. The free-text term always comes first.

use brewdis_server_config::GeoRadius;

use crate::error::CriteriaError;

/// Query matching every document.
pub const WILDCARD: &str = "*";

/// Longest free-text query accepted from clients, in characters.
pub const MAX_TEXT_LENGTH: usize = 512;

pub const MAX_LONGITUDE: f64 = 180.0;

/// Latitude limit of the geohash encoding used by Redis.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// A point and radius for a geo filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
	pub longitude: f64,
	pub latitude: f64,
	pub radius: GeoRadius,
}

impl GeoFilter {
	pub fn new(longitude: f64, latitude: f64, radius: GeoRadius) -> Result<Self, CriteriaError> {
		validate_coordinate("longitude", longitude, MAX_LONGITUDE)?;
		validate_coordinate("latitude", latitude, MAX_LATITUDE)?;
		Ok(Self {
			longitude,
			latitude,
			radius,
		})
	}

	/// Parses a fragment produced by [`geo`] back into its field and filter.
	pub fn parse(fragment: &str) -> Result<(String, GeoFilter), CriteriaError> {
		let invalid = || CriteriaError::InvalidGeoFilter(fragment.to_string());

		let body = fragment.trim().strip_prefix('@').ok_or_else(invalid)?;
		let (field, rest) = body.split_once(":[").ok_or_else(invalid)?;
		let rest = rest.strip_suffix(']').ok_or_else(invalid)?;

		let parts: Vec<&str> = rest.split_whitespace().collect();
		let [longitude, latitude, value, unit] = parts.as_slice() else {
			return Err(invalid());
		};
		let longitude: f64 = longitude.parse().map_err(|_| invalid())?;
		let latitude: f64 = latitude.parse().map_err(|_| invalid())?;
		let radius: GeoRadius = format!("{value} {unit}").parse().map_err(|_| invalid())?;

		Ok((field.to_string(), GeoFilter::new(longitude, latitude, radius)?))
	}
}

fn validate_coordinate(name: &'static str, value: f64, limit: f64) -> Result<(), CriteriaError> {
	if !value.is_finite() {
		return Err(CriteriaError::NonFiniteCoordinate(name));
	}
	if !(-limit..=limit).contains(&value) {
		return Err(CriteriaError::CoordinateOutOfRange {
			name,
			value,
			min: -limit,
			max: limit,
		});
	}
	Ok(())
}

/// Escapes a tag value so punctuation and whitespace are matched literally.
pub fn escape_tag(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for ch in value.chars() {
		if (ch.is_ascii_punctuation() && ch != '_') || ch.is_whitespace() {
			escaped.push('\\');
		}
		escaped.push(ch);
	}
	escaped
}

pub fn tag(field: &str, value: &str) -> String {
	format!("@{field}:{{{}}}", escape_tag(value))
}

pub fn numeric_range(field: &str, min: Option<f64>, max: Option<f64>) -> String {
	let min = min.map_or_else(|| "-inf".to_string(), |v| v.to_string());
	let max = max.map_or_else(|| "inf".to_string(), |v| v.to_string());
	format!("@{field}:[{min} {max}]")
}

pub fn geo(field: &str, filter: &GeoFilter) -> String {
	format!(
		"@{field}:[{} {} {}]",
		filter.longitude, filter.latitude, filter.radius
	)
}

/// Normalizes a free-text term.
///
/// Blank or absent text becomes [`WILDCARD`]. Anything else is passed through
/// as query syntax once it passes the hardening checks.
pub fn text(raw: Option<&str>) -> Result<String, CriteriaError> {
	let trimmed = raw.map(str::trim).unwrap_or_default();
	if trimmed.is_empty() {
		return Ok(WILDCARD.to_string());
	}
	check_text(trimmed)?;
	Ok(trimmed.to_string())
}

fn check_text(text: &str) -> Result<(), CriteriaError> {
	let length = text.chars().count();
	if length > MAX_TEXT_LENGTH {
		return Err(CriteriaError::QueryTooLong {
			length,
			max: MAX_TEXT_LENGTH,
		});
	}
	if text.chars().any(char::is_control) {
		return Err(CriteriaError::ControlCharacters);
	}

	let mut open: Vec<char> = Vec::new();
	let mut in_phrase = false;
	let mut escaped = false;
	for ch in text.chars() {
		if escaped {
			escaped = false;
			continue;
		}
		match ch {
			'\\' => escaped = true,
			'"' => in_phrase = !in_phrase,
			_ if in_phrase => {}
			'(' | '[' | '{' => open.push(ch),
			')' | ']' | '}' => {
				let expected = match ch {
					')' => '(',
					']' => '[',
					_ => '{',
				};
				if open.pop() != Some(expected) {
					return Err(CriteriaError::Unbalanced(expected));
				}
			}
			_ => {}
		}
	}
	if escaped {
		return Err(CriteriaError::DanglingEscape);
	}
	if in_phrase {
		return Err(CriteriaError::UnterminatedPhrase);
	}
	if let Some(unclosed) = open.pop() {
		return Err(CriteriaError::Unbalanced(unclosed));
	}
	Ok(())
}

/// Builder joining a text term and filters into one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExpression {
	text: Option<String>,
	filters: Vec<String>,
}

impl QueryExpression {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn text(mut self, raw: Option<&str>) -> Result<Self, CriteriaError> {
		self.text = Some(text(raw)?);
		Ok(self)
	}

	pub fn tag(mut self, field: &str, value: &str) -> Self {
		self.filters.push(tag(field, value));
		self
	}

	/// Adds a tag filter unless the value is absent or blank.
	pub fn optional_tag(self, field: &str, value: Option<&str>) -> Self {
		match value.map(str::trim).filter(|v| !v.is_empty()) {
			Some(value) => self.tag(field, value),
			None => self,
		}
	}

	pub fn numeric_range(mut self, field: &str, min: Option<f64>, max: Option<f64>) -> Self {
		self.filters.push(numeric_range(field, min, max));
		self
	}

	pub fn geo(mut self, field: &str, filter: &GeoFilter) -> Self {
		self.filters.push(geo(field, filter));
		self
	}

	pub fn build(self) -> String {
		let mut parts = Vec::with_capacity(self.filters.len() + 1);
		if let Some(text) = self.text {
			// A wildcard next to a filter is redundant.
			if text != WILDCARD || self.filters.is_empty() {
				parts.push(text);
			}
		}
		parts.extend(self.filters);
		if parts.is_empty() {
			return WILDCARD.to_string();
		}
		parts.join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use brewdis_server_config::DistanceUnit;
	use proptest::prelude::*;

	fn miles(value: f64) -> GeoRadius {
		GeoRadius::new(value, DistanceUnit::Mi)
	}

	#[test]
	fn test_tag_escapes_punctuation() {
		assert_eq!(tag("sku", "IPA-001"), r"@sku:{IPA\-001}");
		assert_eq!(tag("store", "s 1.a"), r"@store:{s\ 1\.a}");
		assert_eq!(tag("store", "store_1"), "@store:{store_1}");
	}

	#[test]
	fn test_numeric_range_open_bounds() {
		assert_eq!(
			numeric_range("availableToPromise", Some(0.0), None),
			"@availableToPromise:[0 inf]"
		);
		assert_eq!(numeric_range("abv", None, Some(7.5)), "@abv:[-inf 7.5]");
	}

	#[test]
	fn test_geo_fragment() {
		let filter = GeoFilter::new(-122.4, 37.7, miles(25.0)).unwrap();
		assert_eq!(geo("location", &filter), "@location:[-122.4 37.7 25 mi]");
	}

	#[test]
	fn test_coordinates_validated() {
		assert!(matches!(
			GeoFilter::new(181.0, 0.0, miles(1.0)),
			Err(CriteriaError::CoordinateOutOfRange {
				name: "longitude",
				..
			})
		));
		assert!(matches!(
			GeoFilter::new(0.0, 86.0, miles(1.0)),
			Err(CriteriaError::CoordinateOutOfRange {
				name: "latitude",
				..
			})
		));
		assert_eq!(
			GeoFilter::new(f64::NAN, 0.0, miles(1.0)),
			Err(CriteriaError::NonFiniteCoordinate("longitude"))
		);
	}

	#[test]
	fn test_parse_rejects_garbage() {
		assert!(GeoFilter::parse("location:[1 2 3 mi]").is_err());
		assert!(GeoFilter::parse("@location:[1 2 mi]").is_err());
		assert!(GeoFilter::parse("@location:[1 2 3 furlongs]").is_err());
	}

	#[test]
	fn test_text_defaults_to_wildcard() {
		assert_eq!(text(None).unwrap(), "*");
		assert_eq!(text(Some("")).unwrap(), "*");
		assert_eq!(text(Some("   ")).unwrap(), "*");
		assert_eq!(text(Some("  ipa ")).unwrap(), "ipa");
	}

	#[test]
	fn test_text_passes_query_syntax() {
		assert_eq!(
			text(Some(r#"(ipa|stout) -"light beer""#)).unwrap(),
			r#"(ipa|stout) -"light beer""#
		);
		assert_eq!(text(Some(r"\(literal")).unwrap(), r"\(literal");
		assert_eq!(text(Some(r#""brackets ( in phrase""#)).unwrap(), r#""brackets ( in phrase""#);
	}

	#[test]
	fn test_text_hardening() {
		assert_eq!(text(Some("(ipa")), Err(CriteriaError::Unbalanced('(')));
		assert_eq!(text(Some("ipa]")), Err(CriteriaError::Unbalanced('[')));
		assert_eq!(text(Some("{a)")), Err(CriteriaError::Unbalanced('(')));
		assert_eq!(
			text(Some(r#""open phrase"#)),
			Err(CriteriaError::UnterminatedPhrase)
		);
		assert_eq!(text(Some("ipa\u{0}")), Err(CriteriaError::ControlCharacters));
		assert_eq!(text(Some("a\nb")), Err(CriteriaError::ControlCharacters));
		assert_eq!(text(Some("ipa\\")), Err(CriteriaError::DanglingEscape));
		assert_eq!(text(Some("ipa\\\\")), Ok("ipa\\\\".to_string()));
		assert_eq!(text(Some(r"\(ipa")), Ok(r"\(ipa".to_string()));

		let long = "a".repeat(MAX_TEXT_LENGTH + 1);
		assert!(matches!(
			text(Some(&long)),
			Err(CriteriaError::QueryTooLong { .. })
		));
		assert!(text(Some(&"a".repeat(MAX_TEXT_LENGTH))).is_ok());
	}

	#[test]
	fn test_expression_order() {
		let query = QueryExpression::new()
			.numeric_range("availableToPromise", Some(0.0), None)
			.optional_tag("store", Some("s1"))
			.build();
		assert_eq!(query, "@availableToPromise:[0 inf] @store:{s1}");

		let query = QueryExpression::new()
			.text(Some("ipa"))
			.unwrap()
			.tag("sku", "IPA-001")
			.build();
		assert_eq!(query, r"ipa @sku:{IPA\-001}");
	}

	#[test]
	fn test_expression_wildcard_handling() {
		assert_eq!(QueryExpression::new().build(), "*");
		assert_eq!(QueryExpression::new().text(None).unwrap().build(), "*");

		let filter = GeoFilter::new(1.0, 2.0, miles(5.0)).unwrap();
		let query = QueryExpression::new()
			.text(None)
			.unwrap()
			.geo("location", &filter)
			.build();
		assert_eq!(query, "@location:[1 2 5 mi]");
	}

	#[test]
	fn test_optional_tag_skips_blank() {
		let query = QueryExpression::new()
			.numeric_range("availableToPromise", Some(0.0), None)
			.optional_tag("store", Some("  "))
			.optional_tag("sku", None)
			.build();
		assert_eq!(query, "@availableToPromise:[0 inf]");
	}

	fn unit_strategy() -> impl Strategy<Value = DistanceUnit> {
		prop_oneof![
			Just(DistanceUnit::M),
			Just(DistanceUnit::Km),
			Just(DistanceUnit::Mi),
			Just(DistanceUnit::Ft),
		]
	}

	proptest! {
		#[test]
		fn geo_round_trip(
			longitude in -MAX_LONGITUDE..=MAX_LONGITUDE,
			latitude in -MAX_LATITUDE..=MAX_LATITUDE,
			value in 0.001f64..20_000.0,
			unit in unit_strategy(),
		) {
			let filter = GeoFilter::new(longitude, latitude, GeoRadius::new(value, unit)).unwrap();
			let (field, parsed) = GeoFilter::parse(&geo("location", &filter)).unwrap();
			prop_assert_eq!(field, "location");
			prop_assert_eq!(parsed, filter);
		}

		#[test]
		fn escaped_tags_have_no_bare_separators(value in "[ -~]{0,32}") {
			let escaped = escape_tag(&value);
			let mut chars = escaped.chars();
			while let Some(ch) = chars.next() {
				if ch == '\\' {
					prop_assert!(chars.next().is_some());
				} else {
					prop_assert!(!(ch.is_ascii_punctuation() && ch != '_') && !ch.is_whitespace());
				}
			}
		}
	}
}
