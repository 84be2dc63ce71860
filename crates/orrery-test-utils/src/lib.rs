// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Orrery integration tests.
//!
//! Provides an in-memory catalogue and row builders for fast, deterministic
//! tests without a running API.
//!
//! # Components
//!
//! - [`MockCatalogue`] - Scripted [`orrery_core::CatalogueSource`] with call counters
//! - [`fixtures`] - Builders for planet, deleted, and change-log rows

pub mod fixtures;
pub mod mock_catalogue;

pub use mock_catalogue::{CallCounts, MockCatalogue};
