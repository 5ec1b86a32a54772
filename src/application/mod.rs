// SPDX-License-Identifier: MPL-2.0
//! Application layer: ports and read-side queries.
//!
//! - [`port`]: traits the infrastructure implements (asset catalog) and the
//!   measurement seam used by grid geometry
//! - [`query`]: read-only services over an asset snapshot (sibling navigation)
//!
//! The application layer depends on [`crate::domain`] only. Adapters in
//! [`crate::infrastructure`] implement the ports; the UI consumes the queries.
//!
//! ```ignore
//! use asset_lens::application::port::AssetCatalog;
//! use asset_lens::application::query::SiblingNavigator;
//!
//! let listing = catalog.list_assets(&request)?;
//! let next = SiblingNavigator::new(&listing.records, filter).next_from(index);
//! ```

pub mod port;
pub mod query;
