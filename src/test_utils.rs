// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and shared fixtures.
//!
//! Re-exports the `approx` assertion macros and offers small builders for
//! asset lists so grid and navigation tests stay readable.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::application::port::{AssetCatalog, AssetListing, ListRequest};
use crate::domain::asset::{AssetRecord, Category};
use crate::error::CatalogError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-5;

/// Builds a plain file record at `path`.
#[must_use]
pub fn file(path: &str) -> AssetRecord {
    AssetRecord::file(PathBuf::from(path))
}

/// Builds a hidden file record at `path`.
#[must_use]
pub fn hidden_file(path: &str) -> AssetRecord {
    let mut record = file(path);
    record.is_hidden = true;
    record
}

/// Builds a directory record at `path`.
#[must_use]
pub fn dir(path: &str) -> AssetRecord {
    AssetRecord::directory(PathBuf::from(path))
}

/// Builds a lora record at `path`.
#[must_use]
pub fn lora(path: &str) -> AssetRecord {
    let mut record = file(path);
    record.category = Some(Category::Lora);
    record
}

/// Builds a snapshot of `count` generic files named `asset-<n>.safetensors`.
#[must_use]
pub fn numbered_snapshot(count: usize) -> Arc<[AssetRecord]> {
    (0..count)
        .map(|i| file(&format!("/models/asset-{i}.safetensors")))
        .collect()
}

/// Catalog that lists nothing, finds no gallery images and maps every path
/// to itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubCatalog;

impl AssetCatalog for StubCatalog {
    fn list_assets(&self, request: &ListRequest) -> Result<AssetListing, CatalogError> {
        Ok(AssetListing {
            directory: request.directory.clone(),
            records: Vec::new(),
        })
    }

    fn fetch_gallery_images(
        &self,
        _asset_path: &Path,
        _custom_keyword: Option<&str>,
    ) -> Result<Vec<PathBuf>, CatalogError> {
        Ok(Vec::new())
    }

    fn thumbnail_url(&self, path: &Path) -> String {
        path.display().to_string()
    }
}
