// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Theme mode
//! - `[grid]` - Zoom, gap, overscan, listing filters and ordering
//! - `[focus]` - Gallery auto-open and maximum magnification
//! - `[gallery]` - Where example images are searched and how many are kept
//! - `[categorization]` - Size thresholds separating loras from checkpoints
//! - `[library]` - Last opened directory
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ASSET_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use asset_lens::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.grid.zoom_percent = Some(150.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::port::{ListFilters, ListRequest, SortKey, SortOrder};
use crate::domain::asset::{TagSet, VisibilityFilter};
use crate::domain::ui::{GridZoomPercent, MaxViewScale, OverscanRows};
use crate::error::{Error, Result};
use crate::infrastructure::{CategoryThresholds, GallerySettings};
use crate::ui::grid::GeometryCalculator;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
        }
    }
}

/// Grid layout and listing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Card size on the slider scale (10-500).
    #[serde(default = "default_zoom_percent", skip_serializing_if = "Option::is_none")]
    pub zoom_percent: Option<f32>,

    /// Extra rows rendered above and below the visible area.
    #[serde(default = "default_overscan_rows", skip_serializing_if = "Option::is_none")]
    pub overscan_rows: Option<usize>,

    /// Gap between cards, in pixels.
    #[serde(default = "default_gap", skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_hidden_files: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_folders: Option<bool>,

    /// List every file below the directory instead of one level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_subfolder_content: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<SortKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    /// Rating category used for rating sort and the rating keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_category: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            zoom_percent: default_zoom_percent(),
            overscan_rows: default_overscan_rows(),
            gap: default_gap(),
            show_hidden_files: None,
            hide_folders: None,
            show_subfolder_content: None,
            sort_key: None,
            sort_order: None,
            rating_category: None,
        }
    }
}

/// Focus window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusConfig {
    /// Switch to the first gallery image as soon as a gallery arrives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_open_gallery: Option<bool>,

    /// Ceiling of the wheel zoom (1-20).
    #[serde(default = "default_max_view_scale", skip_serializing_if = "Option::is_none")]
    pub max_view_scale: Option<f32>,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            auto_open_gallery: None,
            max_view_scale: default_max_view_scale(),
        }
    }
}

/// Gallery discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Directory searched for example images. The asset's own directory
    /// is searched when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_directory: Option<PathBuf>,

    #[serde(default = "default_max_images", skip_serializing_if = "Option::is_none")]
    pub max_images: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_directory: None,
            max_images: default_max_images(),
        }
    }
}

/// Size thresholds for automatic categorization of model files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategorizationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lora_max_bytes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint_min_bytes: Option<u64>,
}

/// Session continuity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LibraryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_directory: Option<PathBuf>,
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub focus: FocusConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub categorization: CategorizationConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

// =============================================================================
// Resolved values
// =============================================================================

impl Config {
    /// Grid zoom, clamped to the slider range.
    #[must_use]
    pub fn grid_zoom(&self) -> GridZoomPercent {
        GridZoomPercent::new(self.grid.zoom_percent.unwrap_or(DEFAULT_GRID_ZOOM_PERCENT))
    }

    #[must_use]
    pub fn overscan(&self) -> OverscanRows {
        OverscanRows::new(self.grid.overscan_rows.unwrap_or(DEFAULT_OVERSCAN_ROWS))
    }

    /// Card gap in pixels; non-finite or negative values fall back to the default.
    #[must_use]
    pub fn gap(&self) -> f32 {
        match self.grid.gap {
            Some(gap) if gap.is_finite() && gap >= 0.0 => gap.min(MAX_GRID_GAP),
            _ => DEFAULT_GRID_GAP,
        }
    }

    #[must_use]
    pub fn geometry_calculator(&self) -> GeometryCalculator {
        GeometryCalculator::new(self.gap(), self.overscan())
    }

    #[must_use]
    pub fn visibility_filter(&self) -> VisibilityFilter {
        VisibilityFilter::new(
            self.grid.show_hidden_files.unwrap_or(false),
            self.grid.hide_folders.unwrap_or(false),
        )
    }

    #[must_use]
    pub fn rating_category(&self) -> &str {
        match self.grid.rating_category.as_deref() {
            Some(category) if !category.trim().is_empty() => category,
            _ => DEFAULT_RATING_CATEGORY,
        }
    }

    /// Builds a listing request for `directory` from the grid settings and
    /// the session's search text and required tags.
    #[must_use]
    pub fn list_request(
        &self,
        directory: impl Into<PathBuf>,
        search: &str,
        tags: TagSet,
    ) -> ListRequest {
        ListRequest {
            directory: directory.into(),
            sort_key: self.grid.sort_key.unwrap_or_default(),
            sort_order: self.grid.sort_order.unwrap_or_default(),
            filters: ListFilters {
                search: search.to_string(),
                tags,
                show_hidden: self.grid.show_hidden_files.unwrap_or(false),
                hide_folders: self.grid.hide_folders.unwrap_or(false),
                include_subfolders: self.grid.show_subfolder_content.unwrap_or(false),
                rating_category: self.rating_category().to_string(),
            },
        }
    }

    #[must_use]
    pub fn auto_open_gallery(&self) -> bool {
        self.focus
            .auto_open_gallery
            .unwrap_or(DEFAULT_AUTO_OPEN_GALLERY)
    }

    #[must_use]
    pub fn max_view_scale(&self) -> MaxViewScale {
        MaxViewScale::new(self.focus.max_view_scale.unwrap_or(DEFAULT_MAX_VIEW_SCALE))
    }

    #[must_use]
    pub fn gallery_settings(&self) -> GallerySettings {
        GallerySettings {
            image_directory: self.gallery.image_directory.clone(),
            max_images: self
                .gallery
                .max_images
                .unwrap_or(DEFAULT_GALLERY_MAX_IMAGES)
                .clamp(1, MAX_GALLERY_MAX_IMAGES),
        }
    }

    /// Categorization thresholds. An inverted pair keeps the lora bound and
    /// raises the checkpoint bound to match it.
    #[must_use]
    pub fn thresholds(&self) -> CategoryThresholds {
        let lora_max_bytes = self
            .categorization
            .lora_max_bytes
            .unwrap_or(DEFAULT_LORA_MAX_BYTES);
        let checkpoint_min_bytes = self
            .categorization
            .checkpoint_min_bytes
            .unwrap_or(DEFAULT_CHECKPOINT_MIN_BYTES)
            .max(lora_max_bytes);
        CategoryThresholds {
            lora_max_bytes,
            checkpoint_min_bytes,
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_zoom_percent() -> Option<f32> {
    Some(DEFAULT_GRID_ZOOM_PERCENT)
}

fn default_overscan_rows() -> Option<usize> {
    Some(DEFAULT_OVERSCAN_ROWS)
}

fn default_gap() -> Option<f32> {
    Some(DEFAULT_GRID_GAP)
}

fn default_max_view_scale() -> Option<f32> {
    Some(DEFAULT_MAX_VIEW_SCALE)
}

fn default_max_images() -> Option<usize> {
    Some(DEFAULT_GALLERY_MAX_IMAGES)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        let config = Config {
            general: GeneralConfig {
                theme_mode: ThemeMode::Dark,
            },
            grid: GridConfig {
                zoom_percent: Some(250.0),
                show_hidden_files: Some(true),
                sort_key: Some(SortKey::Rating),
                sort_order: Some(SortOrder::Descending),
                rating_category: Some("style".to_string()),
                ..GridConfig::default()
            },
            focus: FocusConfig {
                auto_open_gallery: Some(true),
                max_view_scale: Some(8.0),
            },
            library: LibraryConfig {
                last_directory: Some(PathBuf::from("/models/loras")),
            },
            ..Config::default()
        };

        save_to_path(&config, &config_path).expect("save should succeed");
        let loaded = load_from_path(&config_path).expect("load should succeed");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write file");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b").join("settings.toml");

        save_to_path(&Config::default(), &nested).expect("save should succeed");
        assert!(nested.exists());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.theme_mode, ThemeMode::System);
        assert_abs_diff_eq!(config.grid_zoom().value(), 100.0);
        assert_eq!(config.overscan().value(), 5);
        assert_abs_diff_eq!(config.gap(), 10.0);
        assert!(!config.auto_open_gallery());
        assert_abs_diff_eq!(config.max_view_scale().value(), 5.0);
        assert_eq!(config.gallery_settings().max_images, 100);
        assert_eq!(config.rating_category(), "overall");
        assert!(config.library.last_directory.is_none());
    }

    #[test]
    fn sectioned_file_parses_short_sort_order_names() {
        let content = r#"
[general]
theme_mode = "Light"

[grid]
zoom_percent = 180.0
sort_key = "modified"
sort_order = "desc"
show_subfolder_content = true

[gallery]
image_directory = "/data/outputs"
max_images = 25

[categorization]
lora_max_bytes = 500
checkpoint_min_bytes = 2000
"#;
        let config: Config = toml::from_str(content).expect("valid config");

        assert_eq!(config.general.theme_mode, ThemeMode::Light);
        assert_eq!(config.grid.sort_key, Some(SortKey::Modified));
        assert_eq!(config.grid.sort_order, Some(SortOrder::Descending));
        assert_eq!(
            config.gallery_settings().image_directory,
            Some(PathBuf::from("/data/outputs"))
        );
        assert_eq!(config.gallery_settings().max_images, 25);
        assert_eq!(config.thresholds().lora_max_bytes, 500);
        assert_eq!(config.thresholds().checkpoint_min_bytes, 2000);
        // Unspecified keys keep their defaults.
        assert_eq!(config.overscan().value(), 5);
    }

    #[test]
    fn out_of_range_values_are_clamped_when_resolved() {
        let config = Config {
            grid: GridConfig {
                zoom_percent: Some(9000.0),
                gap: Some(-4.0),
                overscan_rows: Some(1000),
                ..GridConfig::default()
            },
            focus: FocusConfig {
                auto_open_gallery: None,
                max_view_scale: Some(0.2),
            },
            gallery: GalleryConfig {
                image_directory: None,
                max_images: Some(0),
            },
            categorization: CategorizationConfig {
                lora_max_bytes: Some(4000),
                checkpoint_min_bytes: Some(100),
            },
            ..Config::default()
        };

        assert_abs_diff_eq!(config.grid_zoom().value(), 500.0);
        assert_abs_diff_eq!(config.gap(), DEFAULT_GRID_GAP);
        assert_eq!(config.overscan().value(), 50);
        assert_abs_diff_eq!(config.max_view_scale().value(), 1.0);
        assert_eq!(config.gallery_settings().max_images, 1);
        assert_eq!(config.thresholds().checkpoint_min_bytes, 4000);
    }

    #[test]
    fn list_request_carries_grid_filters() {
        let config = Config {
            grid: GridConfig {
                show_hidden_files: Some(true),
                hide_folders: Some(true),
                show_subfolder_content: Some(true),
                sort_key: Some(SortKey::Size),
                ..GridConfig::default()
            },
            ..Config::default()
        };

        let request = config.list_request("/models", "flux", TagSet::from_csv("Anime, style"));

        assert_eq!(request.directory, PathBuf::from("/models"));
        assert_eq!(request.sort_key, SortKey::Size);
        assert_eq!(request.sort_order, SortOrder::Ascending);
        assert_eq!(request.filters.search, "flux");
        assert_eq!(request.filters.tags.to_csv(), "anime,style");
        assert!(request.filters.show_hidden);
        assert!(request.filters.hide_folders);
        assert!(request.filters.include_subfolders);

        let filter = config.visibility_filter();
        assert_eq!(filter, VisibilityFilter::new(true, true));
    }

    #[test]
    fn blank_rating_category_falls_back_to_overall() {
        let mut config = Config::default();
        config.grid.rating_category = Some("  ".to_string());
        assert_eq!(config.rating_category(), "overall");
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.general.theme_mode = ThemeMode::Dark;
        config.grid.zoom_percent = Some(60.0);

        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists(), "config file should exist");

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
        assert_eq!(loaded.grid.zoom_percent, Some(60.0));
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }
}
