// SPDX-License-Identifier: MPL-2.0
//! Asset catalog port.
//!
//! The catalog is the only producer of the ordered asset list the grid works
//! on, and the source of gallery images for lora/checkpoint assets.

use crate::domain::asset::{AssetRecord, TagSet};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Attribute the listing is ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Modified,
    Type,
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::Size,
        SortKey::Modified,
        SortKey::Type,
        SortKey::Rating,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Modified => "Modified",
            SortKey::Type => "Type",
            SortKey::Rating => "Rating",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Filters applied by the catalog before sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilters {
    /// Case-insensitive substring the display name must contain.
    pub search: String,
    /// Tags that must all be present on a file.
    pub tags: TagSet,
    pub show_hidden: bool,
    pub hide_folders: bool,
    /// List the whole tree below the directory instead of one level.
    pub include_subfolders: bool,
    /// Rating category used by [`SortKey::Rating`].
    pub rating_category: String,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            tags: TagSet::new(),
            show_hidden: false,
            hide_folders: false,
            include_subfolders: false,
            rating_category: "overall".to_string(),
        }
    }
}

/// A listing request for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub directory: PathBuf,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub filters: ListFilters,
}

impl ListRequest {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            filters: ListFilters::default(),
        }
    }
}

/// Result of a listing: the ordered records and the directory they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetListing {
    pub directory: PathBuf,
    pub records: Vec<AssetRecord>,
}

impl AssetListing {
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Source of asset listings and gallery images.
///
/// Methods block on I/O; the UI runs them on a blocking worker and feeds the
/// results back as messages.
pub trait AssetCatalog: Send + Sync {
    /// Lists a directory, applying the request's filters and ordering.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the directory cannot be read.
    fn list_assets(&self, request: &ListRequest) -> Result<AssetListing, CatalogError>;

    /// Discovers example images for an asset. The search term is
    /// `custom_keyword` when given, the asset's file stem otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the search directory cannot be walked.
    fn fetch_gallery_images(
        &self,
        asset_path: &Path,
        custom_keyword: Option<&str>,
    ) -> Result<Vec<PathBuf>, CatalogError>;

    /// Maps an asset path to the location of renderable media for it.
    /// Pure string construction; performs no I/O.
    fn thumbnail_url(&self, path: &Path) -> String;
}
