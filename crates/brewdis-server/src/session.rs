// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Anonymous shopper sessions carried in a cookie.
//!
//! The session id only correlates interaction events; it grants nothing.

use std::convert::Infallible;

use axum::{
	extract::FromRequestParts,
	http::{
		header::{COOKIE, SET_COOKIE},
		request::Parts,
		HeaderMap, HeaderValue,
	},
	response::{IntoResponseParts, ResponseParts},
};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "BREWDIS_SESSION";

const MAX_SESSION_ID_LEN: usize = 128;

/// Extract the session id from the Cookie header.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
	headers
		.get(COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			if name == SESSION_COOKIE_NAME && is_valid_session_id(value) {
				Some(value.to_string())
			} else {
				None
			}
		})
}

fn is_valid_session_id(value: &str) -> bool {
	!value.is_empty()
		&& value.len() <= MAX_SESSION_ID_LEN
		&& value
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// The caller's session, created on first contact.
///
/// As a response part it sets the cookie when the session is new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	pub id: String,
	pub is_new: bool,
}

impl Session {
	pub fn new() -> Self {
		Self {
			id: Uuid::new_v4().to_string(),
			is_new: true,
		}
	}

	pub fn cookie(&self) -> String {
		format!(
			"{SESSION_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
			self.id
		)
	}
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
	type Rejection = Infallible;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(match extract_session_cookie(&parts.headers) {
			Some(id) => Session { id, is_new: false },
			None => Session::new(),
		})
	}
}

impl IntoResponseParts for Session {
	type Error = Infallible;

	fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
		if self.is_new {
			if let Ok(value) = HeaderValue::from_str(&self.cookie()) {
				res.headers_mut().append(SET_COOKIE, value);
			}
		}
		Ok(res)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::http::Request;

	#[test]
	fn test_extracts_session_from_multiple_cookies() {
		let mut headers = HeaderMap::new();
		headers.insert(
			COOKIE,
			HeaderValue::from_static("other=value; BREWDIS_SESSION=abc-123; another=test"),
		);
		assert_eq!(extract_session_cookie(&headers), Some("abc-123".to_string()));
	}

	#[test]
	fn test_returns_none_when_cookie_missing() {
		let mut headers = HeaderMap::new();
		assert_eq!(extract_session_cookie(&headers), None);
		headers.insert(COOKIE, HeaderValue::from_static("other=value"));
		assert_eq!(extract_session_cookie(&headers), None);
	}

	#[test]
	fn test_rejects_malformed_session_ids() {
		let mut headers = HeaderMap::new();
		headers.insert(COOKIE, HeaderValue::from_static("BREWDIS_SESSION="));
		assert_eq!(extract_session_cookie(&headers), None);
		headers.insert(COOKIE, HeaderValue::from_static("BREWDIS_SESSION=a\"b"));
		assert_eq!(extract_session_cookie(&headers), None);
	}

	#[test]
	fn test_new_session_cookie() {
		let session = Session::new();
		assert!(session.is_new);
		assert!(Uuid::parse_str(&session.id).is_ok());
		assert!(session
			.cookie()
			.starts_with(&format!("BREWDIS_SESSION={}", session.id)));
		assert!(session.cookie().contains("HttpOnly"));
	}

	#[tokio::test]
	async fn test_extractor_reuses_existing_session() {
		let request = Request::builder()
			.header(COOKIE, "BREWDIS_SESSION=known")
			.body(())
			.unwrap();
		let (mut parts, _) = request.into_parts();
		let session = Session::from_request_parts(&mut parts, &()).await.unwrap();
		assert_eq!(
			session,
			Session {
				id: "known".to_string(),
				is_new: false
			}
		);
	}

	#[tokio::test]
	async fn test_extractor_creates_session() {
		let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
		let session = Session::from_request_parts(&mut parts, &()).await.unwrap();
		assert!(session.is_new);
	}
}
