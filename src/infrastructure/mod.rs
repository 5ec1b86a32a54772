// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the ports defined in `application::port`,
//! wrapping the filesystem and the on-disk metadata store.
//!
//! # Available Adapters
//!
//! - [`filesystem`]: directory listing and gallery discovery (implements [`AssetCatalog`])
//! - [`metadata_store`]: JSON store for tags, ratings, categories and flags
//!
//! [`AssetCatalog`]: crate::application::port::AssetCatalog

pub mod filesystem;
pub mod metadata_store;

pub use filesystem::{CategoryThresholds, FsCatalog, GallerySettings};
pub use metadata_store::{JsonMetadataStore, MetadataUpdate, StoredMetadata};
