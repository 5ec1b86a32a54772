// SPDX-License-Identifier: MPL-2.0
//! Per-asset metadata persisted as a JSON document in the data directory.
//!
//! Entries are keyed by the normalised path of the asset's primary file. The
//! whole document is rewritten on every change through a temp file and an
//! atomic rename, so a crash never leaves a half-written store behind.

use crate::domain::asset::{Category, Ratings, TagSet};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

/// File name of the store inside the data directory.
pub const METADATA_FILE: &str = "metadata.json";

const STORE_VERSION: u32 = 1;

/// Stored attributes of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ratings: BTreeMap<String, u8>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub is_category_manual: bool,
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_gallery_keyword: Option<String>,
}

impl StoredMetadata {
    #[must_use]
    pub fn tag_set(&self) -> TagSet {
        let mut tags = TagSet::new();
        for tag in &self.tags {
            tags.insert(tag);
        }
        tags
    }

    #[must_use]
    pub fn rating_map(&self) -> Ratings {
        let mut ratings = Ratings::new();
        for (category, value) in &self.ratings {
            ratings.set(category, i64::from(*value));
        }
        ratings
    }

    /// Parsed category; unknown identifiers are ignored.
    #[must_use]
    pub fn parsed_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|raw| raw.parse().ok())
    }

    /// Custom gallery keyword, `None` when unset or blank.
    #[must_use]
    pub fn gallery_keyword(&self) -> Option<&str> {
        self.custom_gallery_keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }
}

/// A partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataUpdate {
    /// Replaces the tag list.
    pub tags: Option<TagSet>,
    /// Merged into the existing ratings.
    pub ratings: Option<Ratings>,
    pub notes: Option<String>,
    pub is_hidden: Option<bool>,
    /// An empty keyword clears it.
    pub custom_gallery_keyword: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    entries: BTreeMap<String, StoredMetadata>,
}

/// JSON-backed metadata store.
#[derive(Debug)]
pub struct JsonMetadataStore {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, StoredMetadata>>,
}

impl JsonMetadataStore {
    /// Opens the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<StoreDocument>(&content)?.entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Store that never touches the disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Location of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, StoredMetadata>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Metadata("Lock poisoned".to_string()))
    }

    /// Returns the stored metadata for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<StoredMetadata> {
        let entries = self.lock().ok()?;
        entries.get(&normalize_key(path)).cloned()
    }

    /// Copies every entry, for bulk lookups during a listing.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, StoredMetadata> {
        self.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    /// Applies a partial update and persists the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn upsert(&self, path: &Path, update: MetadataUpdate) -> Result<StoredMetadata> {
        let mut entries = self.lock()?;
        let entry = entries.entry(normalize_key(path)).or_default();

        if let Some(tags) = update.tags {
            entry.tags = tags.iter().map(str::to_string).collect();
        }
        if let Some(ratings) = update.ratings {
            let mut merged = entry.rating_map();
            merged.merge(&ratings);
            entry.ratings = merged
                .iter()
                .map(|(category, rating)| (category.to_string(), rating.value()))
                .collect();
        }
        if let Some(notes) = update.notes {
            entry.notes = notes;
        }
        if let Some(is_hidden) = update.is_hidden {
            entry.is_hidden = is_hidden;
        }
        if let Some(keyword) = update.custom_gallery_keyword {
            let keyword = keyword.trim();
            entry.custom_gallery_keyword = (!keyword.is_empty()).then(|| keyword.to_string());
        }

        let updated = entry.clone();
        self.persist(&entries)?;
        Ok(updated)
    }

    /// Sets or clears the category. `manual` marks a user decision that
    /// automatic categorization must not override.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_category(&self, path: &Path, category: Option<Category>, manual: bool) -> Result<()> {
        let mut entries = self.lock()?;
        let entry = entries.entry(normalize_key(path)).or_default();
        entry.category = category.map(|c| c.as_str().to_string());
        entry.is_category_manual = manual && category.is_some();
        self.persist(&entries)
    }

    fn persist(&self, entries: &BTreeMap<String, StoredMetadata>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let document = StoreDocument {
            version: STORE_VERSION,
            entries: entries.clone(),
        };
        let content = serde_json::to_string_pretty(&document)?;
        write_atomic(path, &content)?;
        Ok(())
    }
}

/// Writes `content` to a sibling temp file, then renames it over `path`.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

/// Lexically normalises a path into a store key: `.` components are dropped,
/// `..` pops the previous component and separators become `/`.
#[must_use]
pub fn normalize_key(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut prefix = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => prefix = p.as_os_str().to_string_lossy().into_owned(),
            Component::RootDir => prefix.push('/'),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }
    let key = format!("{prefix}{}", parts.join("/"));
    if cfg!(windows) {
        key.to_lowercase()
    } else {
        key
    }
}
