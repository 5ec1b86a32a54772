// SPDX-License-Identifier: MPL-2.0
//! The asset record and its user-editable attributes.

use super::kind::{mime_type_for, FileKind};
use super::naming::true_base_name;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::SystemTime;

// =============================================================================
// Category
// =============================================================================

/// What kind of asset an entry is, as assigned by the user or by automatic
/// categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Lora,
    Checkpoint,
    Video,
    Images,
    EvaluationGrid,
    Misc,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Lora,
        Category::Checkpoint,
        Category::Video,
        Category::Images,
        Category::EvaluationGrid,
        Category::Misc,
    ];

    /// Stable identifier used in persisted metadata.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Lora => "lora",
            Category::Checkpoint => "checkpoint",
            Category::Video => "video",
            Category::Images => "images",
            Category::EvaluationGrid => "evaluation-grid",
            Category::Misc => "misc",
        }
    }

    /// Only model weights have example images worth searching for.
    #[must_use]
    pub fn qualifies_for_gallery(self) -> bool {
        matches!(self, Category::Lora | Category::Checkpoint)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Star rating, guaranteed to be within 0–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    /// Creates a rating, clamping out-of-range input.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(u8::try_from(value.clamp(0, i64::from(Self::MAX))).unwrap_or(Self::MAX))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Ratings keyed by rating category (e.g. `overall`, `quality`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ratings(BTreeMap<String, Rating>);

impl Ratings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a rating; the category name is lowercased and the value clamped.
    pub fn set(&mut self, category: &str, value: i64) {
        self.0
            .insert(category.trim().to_lowercase(), Rating::new(value));
    }

    /// Returns the rating for a category, `0` when unrated.
    #[must_use]
    pub fn get(&self, category: &str) -> Rating {
        self.0
            .get(&category.trim().to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    /// Overwrites existing entries with those of `other`.
    pub fn merge(&mut self, other: &Ratings) {
        for (category, rating) in &other.0 {
            self.0.insert(category.clone(), *rating);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rating)> {
        self.0.iter().map(|(category, rating)| (category.as_str(), *rating))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// TagSet
// =============================================================================

/// Case-normalized set of tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated tag list, dropping blanks.
    #[must_use]
    pub fn from_csv(raw: &str) -> Self {
        let mut tags = Self::new();
        for tag in raw.split(',') {
            tags.insert(tag);
        }
        tags
    }

    /// Inserts a tag after trimming and lowercasing. Blank input is ignored.
    pub fn insert(&mut self, tag: &str) -> bool {
        let normalized = tag.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.0.insert(normalized)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag.trim().to_lowercase())
    }

    /// Whether every tag of `required` is present.
    #[must_use]
    pub fn contains_all(&self, required: &TagSet) -> bool {
        required.0.is_subset(&self.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-separated representation, sorted.
    #[must_use]
    pub fn to_csv(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }
}

// =============================================================================
// AssetRecord
// =============================================================================

/// One entry in the ordered asset list.
///
/// Records are produced by the catalog on every scan. The grid treats the list
/// as an immutable snapshot; edits go back through the metadata store and the
/// next refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    /// Unique identifier. For grouped files this is the primary file path.
    pub path: PathBuf,
    /// Display name: the true base name for files, the folder name otherwise.
    pub name: String,
    pub is_directory: bool,
    pub category: Option<Category>,
    /// Set when the category came from an explicit user action; automatic
    /// categorization must leave such records alone.
    pub is_category_manual: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub created: Option<SystemTime>,
    pub mime_type: String,
    /// Lowercase extension including the leading dot, empty for directories.
    pub extension: String,
    pub tags: TagSet,
    pub ratings: Ratings,
    pub notes: String,
    pub is_hidden: bool,
    /// The primary file is gone but sidecars (or stored metadata) remain.
    pub is_missing: bool,
    pub preview_image_path: Option<PathBuf>,
    pub custom_gallery_keyword: Option<String>,
}

impl AssetRecord {
    /// Creates a file record with name, extension and MIME type derived from
    /// the path. Everything else starts empty.
    #[must_use]
    pub fn file(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self {
            name: true_base_name(&file_name),
            mime_type: mime_type_for(&extension).to_string(),
            extension,
            ..Self::empty(path, false)
        }
    }

    /// Creates a directory record.
    #[must_use]
    pub fn directory(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            mime_type: "folder".to_string(),
            ..Self::empty(path, true)
        }
    }

    fn empty(path: PathBuf, is_directory: bool) -> Self {
        Self {
            path,
            name: String::new(),
            is_directory,
            category: None,
            is_category_manual: false,
            size: 0,
            modified: None,
            created: None,
            mime_type: String::new(),
            extension: String::new(),
            tags: TagSet::new(),
            ratings: Ratings::new(),
            notes: String::new(),
            is_hidden: false,
            is_missing: false,
            preview_image_path: None,
            custom_gallery_keyword: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.extension)
    }

    /// Whether focusing this asset should trigger a gallery search.
    #[must_use]
    pub fn qualifies_for_gallery(&self) -> bool {
        !self.is_directory && self.category.is_some_and(Category::qualifies_for_gallery)
    }

    /// The image shown for this asset in the grid and the focus viewer:
    /// its preview sidecar, or the file itself when it is an image.
    #[must_use]
    pub fn display_image(&self) -> Option<&std::path::Path> {
        if let Some(preview) = &self.preview_image_path {
            return Some(preview.as_path());
        }
        (self.kind() == FileKind::Image && !self.is_missing).then_some(self.path.as_path())
    }
}
