// SPDX-License-Identifier: MPL-2.0
//! Filesystem-backed asset catalog.
//!
//! Lists a directory, groups sidecar files with the model they belong to,
//! merges stored metadata and discovers gallery images by file name.

use crate::application::port::catalog::{
    AssetCatalog, AssetListing, ListFilters, ListRequest, SortKey, SortOrder,
};
use crate::domain::asset::kind::extensions::IMAGE_EXTENSIONS;
use crate::domain::asset::naming::{is_preview_name, primary_rank, FALLBACK_PRIMARY_SUFFIX};
use crate::domain::asset::{true_base_name, AssetRecord, Category, FileKind};
use crate::error::CatalogError;
use crate::infrastructure::metadata_store::{normalize_key, JsonMetadataStore, StoredMetadata};
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Preview extensions tried by [`AssetCatalog::thumbnail_url`], in order.
const THUMBNAIL_PREVIEW_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Stored gallery keyword meaning "show no gallery images".
pub const NO_GALLERY_KEYWORD: &str = "0";

/// Size boundaries used to tell loras from checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryThresholds {
    /// Model files strictly below this size are loras.
    pub lora_max_bytes: u64,
    /// Model files at or above this size are checkpoints.
    pub checkpoint_min_bytes: u64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            lora_max_bytes: 1024 * 1024 * 1024,
            checkpoint_min_bytes: 3 * 1024 * 1024 * 1024,
        }
    }
}

impl CategoryThresholds {
    /// Category inferred from file kind and size. `None` for files that
    /// carry no obvious category.
    #[must_use]
    pub fn categorize(&self, kind: FileKind, size: u64) -> Option<Category> {
        match kind {
            FileKind::Model if size < self.lora_max_bytes => Some(Category::Lora),
            FileKind::Model if size >= self.checkpoint_min_bytes => Some(Category::Checkpoint),
            FileKind::Model => Some(Category::Misc),
            FileKind::Video => Some(Category::Video),
            FileKind::Image => Some(Category::Images),
            FileKind::Json | FileKind::Other => None,
        }
    }
}

/// Where and how many gallery images are collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySettings {
    /// Searched instead of the asset's own directory when set.
    pub image_directory: Option<PathBuf>,
    pub max_images: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            image_directory: None,
            max_images: 100,
        }
    }
}

/// [`AssetCatalog`] over the local filesystem.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    store: Arc<JsonMetadataStore>,
    gallery: GallerySettings,
    thresholds: CategoryThresholds,
}

impl FsCatalog {
    #[must_use]
    pub fn new(store: Arc<JsonMetadataStore>) -> Self {
        Self {
            store,
            gallery: GallerySettings::default(),
            thresholds: CategoryThresholds::default(),
        }
    }

    #[must_use]
    pub fn with_gallery(mut self, gallery: GallerySettings) -> Self {
        self.gallery = gallery;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: CategoryThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<JsonMetadataStore> {
        &self.store
    }

    fn collect_entries(
        &self,
        directory: &Path,
        filters: &ListFilters,
    ) -> Result<(Vec<PathBuf>, Vec<PathBuf>), CatalogError> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        if filters.include_subfolders {
            let walker = WalkDir::new(directory)
                .min_depth(1)
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| !is_dot_name(entry.file_name()));
            for entry in walker.filter_map(std::result::Result::ok) {
                if entry.file_type().is_dir() {
                    if !filters.hide_folders {
                        dirs.push(entry.into_path());
                    }
                } else {
                    files.push(entry.into_path());
                }
            }
        } else {
            let read_dir = fs::read_dir(directory).map_err(|e| CatalogError::from_io(&e, directory))?;
            for entry in read_dir.filter_map(std::result::Result::ok) {
                if is_dot_name(&entry.file_name()) {
                    continue;
                }
                let path = entry.path();
                // Follows symlinks, like the recursive walk.
                match fs::metadata(&path) {
                    Ok(meta) if meta.is_dir() => {
                        if !filters.hide_folders {
                            dirs.push(path);
                        }
                    }
                    Ok(_) => files.push(path),
                    Err(_) => {}
                }
            }
        }

        files.sort();
        dirs.sort();
        Ok((files, dirs))
    }

    fn directory_record(path: PathBuf) -> AssetRecord {
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();
        let mut record = AssetRecord::directory(path);
        record.modified = modified;
        record
    }

    /// Builds the record for one group of files sharing a true base name.
    /// Returns `None` when none of the files could be read.
    fn group_record(
        &self,
        directory: &Path,
        base_name: &str,
        members: &[PathBuf],
        stored: &BTreeMap<String, StoredMetadata>,
    ) -> Option<AssetRecord> {
        let mut primary: Option<(usize, &PathBuf, fs::Metadata)> = None;
        let mut preview: Option<&PathBuf> = None;
        let mut any_exists = false;

        for member in members {
            let Ok(meta) = fs::metadata(member) else {
                continue;
            };
            any_exists = true;
            let file_name = member
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if is_preview_name(&file_name) {
                preview.get_or_insert(member);
                continue;
            }
            if let Some(rank) = primary_rank(&file_name) {
                if primary.as_ref().is_none_or(|(best, _, _)| rank < *best) {
                    primary = Some((rank, member, meta));
                }
            }
        }

        if !any_exists {
            return None;
        }

        let mut record = match primary {
            Some((_, path, meta)) => {
                let mut record = AssetRecord::file(path.clone());
                record.size = meta.len();
                record.modified = meta.modified().ok();
                record.created = meta.created().ok();
                record
            }
            None => {
                let conceptual = directory.join(format!("{base_name}{FALLBACK_PRIMARY_SUFFIX}"));
                let mut record = AssetRecord::file(conceptual);
                record.is_missing = true;
                record
            }
        };
        record.preview_image_path = preview.cloned();

        if let Some(meta) = stored.get(&normalize_key(&record.path)) {
            apply_stored(&mut record, meta);
        }
        if !record.is_category_manual && record.category.is_none() && !record.is_missing {
            record.category = self.thresholds.categorize(record.kind(), record.size);
        }
        Some(record)
    }

    fn passes_filters(record: &AssetRecord, filters: &ListFilters, search: &str) -> bool {
        if !search.is_empty() && !record.name.to_lowercase().contains(search) {
            return false;
        }
        if !record.is_directory && record.is_hidden && !filters.show_hidden {
            return false;
        }
        filters.tags.is_empty() || record.tags.contains_all(&filters.tags)
    }
}

fn is_dot_name(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn apply_stored(record: &mut AssetRecord, meta: &StoredMetadata) {
    record.tags = meta.tag_set();
    record.ratings = meta.rating_map();
    record.notes.clone_from(&meta.notes);
    record.category = meta.parsed_category();
    record.is_category_manual = meta.is_category_manual && record.category.is_some();
    record.is_hidden = meta.is_hidden;
    record.custom_gallery_keyword = meta.gallery_keyword().map(str::to_string);
}

/// Orders two records for `key`, ascending. Directories sort first for the
/// size, type and rating keys.
fn compare(a: &AssetRecord, b: &AssetRecord, key: SortKey, rating_category: &str) -> Ordering {
    let dirs_first = |r: &AssetRecord| u8::from(!r.is_directory);
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Size => (dirs_first(a), a.size).cmp(&(dirs_first(b), b.size)),
        SortKey::Modified => a.modified.cmp(&b.modified),
        SortKey::Type => (dirs_first(a), &a.extension).cmp(&(dirs_first(b), &b.extension)),
        SortKey::Rating => (dirs_first(a), a.ratings.get(rating_category))
            .cmp(&(dirs_first(b), b.ratings.get(rating_category))),
    }
}

/// Sorts in place. Descending order reverses the whole key, so directories
/// end up last.
pub fn sort_records(records: &mut [AssetRecord], key: SortKey, order: SortOrder, rating_category: &str) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key, rating_category);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Parent of `directory`, or `None` at a filesystem root.
#[must_use]
pub fn parent_directory(directory: &Path) -> Option<PathBuf> {
    directory
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

impl AssetCatalog for FsCatalog {
    fn list_assets(&self, request: &ListRequest) -> Result<AssetListing, CatalogError> {
        let directory = request.directory.as_path();
        let meta = fs::metadata(directory).map_err(|e| CatalogError::from_io(&e, directory))?;
        if !meta.is_dir() {
            return Err(CatalogError::InvalidPath(directory.display().to_string()));
        }

        let filters = &request.filters;
        let (files, dirs) = self.collect_entries(directory, filters)?;
        let stored = self.store.snapshot();

        let mut groups: BTreeMap<(PathBuf, String), Vec<PathBuf>> = BTreeMap::new();
        for file in files {
            let parent = file.parent().map(Path::to_path_buf).unwrap_or_default();
            let base = file
                .file_name()
                .map(|n| true_base_name(&n.to_string_lossy()))
                .unwrap_or_default();
            groups.entry((parent, base)).or_default().push(file);
        }

        let search = filters.search.trim().to_lowercase();
        let mut records: Vec<AssetRecord> = dirs
            .into_iter()
            .map(Self::directory_record)
            .chain(groups.iter().filter_map(|((parent, base), members)| {
                self.group_record(parent, base, members, &stored)
            }))
            .filter(|record| Self::passes_filters(record, filters, &search))
            .collect();

        sort_records(
            &mut records,
            request.sort_key,
            request.sort_order,
            &filters.rating_category,
        );

        Ok(AssetListing {
            directory: directory.to_path_buf(),
            records,
        })
    }

    fn fetch_gallery_images(
        &self,
        asset_path: &Path,
        custom_keyword: Option<&str>,
    ) -> Result<Vec<PathBuf>, CatalogError> {
        let term = match custom_keyword.map(str::trim).filter(|k| !k.is_empty()) {
            // a stored "0" disables the gallery for this asset
            Some(NO_GALLERY_KEYWORD) => String::new(),
            Some(keyword) => keyword.to_lowercase(),
            None => asset_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
        };
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let search_root = match &self.gallery.image_directory {
            Some(dir) => dir.clone(),
            None => asset_path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| CatalogError::InvalidPath(asset_path.display().to_string()))?,
        };
        fs::metadata(&search_root).map_err(|e| CatalogError::from_io(&e, &search_root))?;

        let mut found: Vec<(SystemTime, PathBuf)> = WalkDir::new(&search_root)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy().to_lowercase();
                let is_image = Path::new(&name)
                    .extension()
                    .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()));
                is_image && name.contains(&term)
            })
            .filter_map(|entry| {
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some((modified, entry.into_path()))
            })
            .collect();

        found.sort_by_key(|(modified, _)| Reverse(*modified));
        found.truncate(self.gallery.max_images);
        found.sort_by_key(|(modified, _)| *modified);
        Ok(found.into_iter().map(|(_, path)| path).collect())
    }

    fn thumbnail_url(&self, path: &Path) -> String {
        let renderable = path
            .extension()
            .is_some_and(|ext| FileKind::from_extension(&ext.to_string_lossy()).is_renderable());
        if renderable {
            return path.display().to_string();
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let preview = format!("{stem}.preview.{}", THUMBNAIL_PREVIEW_EXTENSIONS[0]);
        path.with_file_name(preview).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::metadata_store::MetadataUpdate;
    use std::time::Duration;
    use tempfile::tempdir;

    fn touch(path: &Path, bytes: usize) {
        fs::write(path, vec![0u8; bytes]).expect("write file");
    }

    fn set_mtime(path: &Path, secs: u64) {
        let file = fs::File::options().write(true).open(path).expect("open");
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .expect("set mtime");
    }

    fn catalog() -> FsCatalog {
        FsCatalog::new(Arc::new(JsonMetadataStore::in_memory()))
    }

    #[test]
    fn thresholds_split_models_by_size() {
        let t = CategoryThresholds {
            lora_max_bytes: 10,
            checkpoint_min_bytes: 30,
        };
        assert_eq!(t.categorize(FileKind::Model, 9), Some(Category::Lora));
        assert_eq!(t.categorize(FileKind::Model, 10), Some(Category::Misc));
        assert_eq!(t.categorize(FileKind::Model, 30), Some(Category::Checkpoint));
        assert_eq!(t.categorize(FileKind::Video, 0), Some(Category::Video));
        assert_eq!(t.categorize(FileKind::Json, 0), None);
    }

    #[test]
    fn groups_sidecars_under_primary() {
        let temp = tempdir().expect("temp dir");
        touch(&temp.path().join("style.safetensors"), 4);
        touch(&temp.path().join("style.preview.png"), 1);
        touch(&temp.path().join("style.cm-info.json"), 1);

        let listing = catalog()
            .list_assets(&ListRequest::new(temp.path()))
            .expect("list");
        assert_eq!(listing.count(), 1);
        let record = &listing.records[0];
        assert_eq!(record.name, "style");
        assert_eq!(record.path, temp.path().join("style.safetensors"));
        assert_eq!(
            record.preview_image_path.as_deref(),
            Some(temp.path().join("style.preview.png").as_path())
        );
        assert_eq!(record.category, Some(Category::Lora));
        assert!(!record.is_missing);
    }

    #[test]
    fn preview_only_group_is_missing() {
        let temp = tempdir().expect("temp dir");
        touch(&temp.path().join("gone.preview.png"), 1);

        let listing = catalog()
            .list_assets(&ListRequest::new(temp.path()))
            .expect("list");
        let record = &listing.records[0];
        assert!(record.is_missing);
        assert_eq!(record.path, temp.path().join("gone.safetensors"));
    }

    #[test]
    fn dotfiles_are_skipped_and_folders_optional() {
        let temp = tempdir().expect("temp dir");
        touch(&temp.path().join(".secret.png"), 1);
        touch(&temp.path().join("a.png"), 1);
        fs::create_dir(temp.path().join("sub")).expect("mkdir");

        let mut request = ListRequest::new(temp.path());
        let listing = catalog().list_assets(&request).expect("list");
        assert_eq!(listing.count(), 2);
        assert!(listing.records[0].is_directory || listing.records[1].is_directory);

        request.filters.hide_folders = true;
        let listing = catalog().list_assets(&request).expect("list");
        assert_eq!(listing.count(), 1);
        assert_eq!(listing.records[0].name, "a");
    }

    #[test]
    fn subfolder_content_walks_recursively() {
        let temp = tempdir().expect("temp dir");
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).expect("mkdir");
        touch(&sub.join("deep.png"), 1);

        let mut request = ListRequest::new(temp.path());
        request.filters.include_subfolders = true;
        request.filters.hide_folders = true;
        let listing = catalog().list_assets(&request).expect("list");
        assert_eq!(listing.count(), 1);
        assert_eq!(listing.records[0].path, sub.join("deep.png"));
    }

    #[test]
    fn stored_metadata_drives_filters() {
        let temp = tempdir().expect("temp dir");
        let a = temp.path().join("a.safetensors");
        let b = temp.path().join("b.safetensors");
        touch(&a, 1);
        touch(&b, 1);

        let store = Arc::new(JsonMetadataStore::in_memory());
        store
            .upsert(
                &a,
                MetadataUpdate {
                    is_hidden: Some(true),
                    ..MetadataUpdate::default()
                },
            )
            .expect("hide");
        store
            .upsert(
                &b,
                MetadataUpdate {
                    tags: Some(crate::domain::asset::TagSet::from_csv("anime")),
                    ..MetadataUpdate::default()
                },
            )
            .expect("tag");
        let catalog = FsCatalog::new(store);

        let mut request = ListRequest::new(temp.path());
        let names: Vec<_> = catalog
            .list_assets(&request)
            .expect("list")
            .records
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["b"]);

        request.filters.show_hidden = true;
        request.filters.tags = crate::domain::asset::TagSet::from_csv("ANIME");
        let names: Vec<_> = catalog
            .list_assets(&request)
            .expect("list")
            .records
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn manual_category_is_not_recomputed() {
        let temp = tempdir().expect("temp dir");
        let a = temp.path().join("a.safetensors");
        touch(&a, 1);
        let store = Arc::new(JsonMetadataStore::in_memory());
        store
            .set_category(&a, Some(Category::Checkpoint), true)
            .expect("category");

        let listing = FsCatalog::new(store)
            .list_assets(&ListRequest::new(temp.path()))
            .expect("list");
        assert_eq!(listing.records[0].category, Some(Category::Checkpoint));
        assert!(listing.records[0].is_category_manual);
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let temp = tempdir().expect("temp dir");
        touch(&temp.path().join("Hero.png"), 1);
        touch(&temp.path().join("villain.png"), 1);
        let mut request = ListRequest::new(temp.path());
        request.filters.search = "HER".into();
        let listing = catalog().list_assets(&request).expect("list");
        assert_eq!(listing.count(), 1);
        assert_eq!(listing.records[0].name, "Hero");
    }

    #[test]
    fn size_sort_descending_puts_directories_last() {
        let mut records = vec![
            crate::test_utils::dir("/m/sub"),
            crate::test_utils::file("/m/big.pt"),
            crate::test_utils::file("/m/small.pt"),
        ];
        records[1].size = 100;
        records[2].size = 1;

        sort_records(&mut records, SortKey::Size, SortOrder::Ascending, "overall");
        assert_eq!(records[0].name, "sub");
        assert_eq!(records[2].name, "big");

        sort_records(&mut records, SortKey::Size, SortOrder::Descending, "overall");
        assert_eq!(records[0].name, "big");
        assert_eq!(records[2].name, "sub");
    }

    #[test]
    fn missing_directory_reports_not_found() {
        let temp = tempdir().expect("temp dir");
        let result = catalog().list_assets(&ListRequest::new(temp.path().join("nope")));
        assert!(matches!(result, Err(CatalogError::DirectoryNotFound(_))));
    }

    #[test]
    fn file_path_is_invalid_directory() {
        let temp = tempdir().expect("temp dir");
        let file = temp.path().join("a.png");
        touch(&file, 1);
        let result = catalog().list_assets(&ListRequest::new(&file));
        assert!(matches!(result, Err(CatalogError::InvalidPath(_))));
    }

    #[test]
    fn gallery_keeps_newest_then_orders_oldest_first() {
        let temp = tempdir().expect("temp dir");
        let asset = temp.path().join("hero.safetensors");
        touch(&asset, 1);
        for (name, secs) in [
            ("hero_1.png", 100),
            ("hero_2.png", 300),
            ("HERO_3.jpg", 200),
            ("other.png", 400),
            ("hero.txt", 500),
        ] {
            let path = temp.path().join(name);
            touch(&path, 1);
            set_mtime(&path, secs);
        }

        let catalog = catalog().with_gallery(GallerySettings {
            image_directory: None,
            max_images: 2,
        });
        let images = catalog.fetch_gallery_images(&asset, None).expect("gallery");
        assert_eq!(
            images,
            vec![temp.path().join("HERO_3.jpg"), temp.path().join("hero_2.png")]
        );
    }

    #[test]
    fn gallery_uses_custom_keyword() {
        let temp = tempdir().expect("temp dir");
        let asset = temp.path().join("x.safetensors");
        touch(&temp.path().join("knight.png"), 1);
        let images = catalog()
            .fetch_gallery_images(&asset, Some(" Knight "))
            .expect("gallery");
        assert_eq!(images, vec![temp.path().join("knight.png")]);
    }

    #[test]
    fn gallery_with_blank_term_is_empty() {
        let images = catalog()
            .fetch_gallery_images(Path::new("/"), Some("  "))
            .expect("gallery");
        assert!(images.is_empty());
    }

    #[test]
    fn zero_keyword_disables_gallery() {
        let temp = tempdir().expect("temp dir");
        let asset = temp.path().join("hero.safetensors");
        touch(&temp.path().join("hero_1.png"), 1);
        touch(&temp.path().join("0.png"), 1);

        let images = catalog()
            .fetch_gallery_images(&asset, Some("0"))
            .expect("gallery");
        assert!(images.is_empty());
        // absent keyword still falls back to the stem
        let images = catalog().fetch_gallery_images(&asset, None).expect("gallery");
        assert_eq!(images, vec![temp.path().join("hero_1.png")]);
    }

    #[test]
    fn thumbnail_url_is_pure() {
        let catalog = catalog();
        assert_eq!(catalog.thumbnail_url(Path::new("/m/a.png")), "/m/a.png");
        assert_eq!(
            catalog.thumbnail_url(Path::new("/m/a.safetensors")),
            "/m/a.preview.png"
        );
    }

    #[test]
    fn parent_of_root_is_none() {
        assert_eq!(parent_directory(Path::new("/")), None);
        assert_eq!(
            parent_directory(Path::new("/m/loras")),
            Some(PathBuf::from("/m"))
        );
    }
}
