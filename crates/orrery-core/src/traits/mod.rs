// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the reconciler and the catalogue API.
//!
//! Traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod catalogue;

pub use catalogue::CatalogueSource;
