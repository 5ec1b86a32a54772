// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`catalog`]: directory listing, gallery discovery and thumbnail sources
//! - [`cell_size`]: measurement of one grid cell at a given scale
//!
//! # Design Notes
//!
//! - Traits use domain types only (no Iced handles)
//! - No `async fn`: callers wrap blocking calls in an Iced `Task`
//! - Catalog implementations are `Send + Sync` so they can be shared with
//!   background tasks behind an `Arc`

pub mod catalog;
pub mod cell_size;

pub use catalog::{AssetCatalog, AssetListing, ListFilters, ListRequest, SortKey, SortOrder};
pub use cell_size::{CellSize, CellSizeProvider, FixedCellSize};
