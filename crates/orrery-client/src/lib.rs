// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async client for the exoplanet catalogue REST API.
//!
//! [`CatalogueClient`] covers the system probes, planet CRUD, aggregates,
//! admin operations, the change log, and the discovery visualization
//! endpoints. It also implements [`orrery_core::CatalogueSource`] so the
//! activity reconciler can read through it.

pub mod client;
pub mod problem;

pub use client::{CatalogueClient, API_KEY_HEADER};
pub use problem::{describe_error, friendly_admin_error, validation_messages};
