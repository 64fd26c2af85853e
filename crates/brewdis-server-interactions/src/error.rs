// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
	#[error("transient error: {0}")]
	Transient(String),

	#[error("permanent error: {0}")]
	Permanent(String),
}
