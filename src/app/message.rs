// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::AssetListing;
use crate::error::CatalogError;
use crate::ui::focus::{self, GalleryRequest};
use crate::ui::grid;
use crate::ui::notifications;
use crate::ui::toolbar;
use iced::keyboard::{self, Key};
use iced::Size;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Grid(grid::Message),
    Focus(focus::Message),
    Toolbar(toolbar::Message),
    Notification(notifications::NotificationMessage),
    /// Result of a background listing. `request` identifies the listing so
    /// a slow answer cannot overwrite a newer one.
    AssetsListed {
        request: u64,
        result: Result<AssetListing, CatalogError>,
        duration_ms: u64,
    },
    /// Result of a background gallery lookup, before it reaches the focus viewer.
    GalleryFetched {
        request: GalleryRequest,
        asset_path: PathBuf,
        result: Result<Vec<PathBuf>, CatalogError>,
        duration_ms: u64,
    },
    /// Result from the open folder dialog.
    FolderPicked(Option<PathBuf>),
    KeyPressed {
        key: Key,
        modifiers: keyboard::Modifiers,
    },
    WindowResized(Size),
    /// Next animation frame while a grid render is pending.
    Frame(Instant),
    Tick(Instant), // Periodic tick for notification auto-dismiss
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional directory to list on startup. Falls back to the last
    /// directory recorded in the settings.
    pub directory: Option<String>,
    /// Optional data directory override (for the metadata store).
    /// Takes precedence over `ASSET_LENS_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ASSET_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
