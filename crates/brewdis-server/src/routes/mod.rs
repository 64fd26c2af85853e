// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod availability;
pub mod config;
pub mod health;
pub mod inventory;
pub mod products;
pub mod reference;
pub mod suggestions;
