// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the grid and the focus viewer.
//!
//! The `App` struct is the single owner of the asset snapshot, the grid and
//! focus state machines, the catalog and the diagnostics collector. It
//! translates component effects into background catalog tasks, metadata
//! writes and notifications, and persists preference changes as they happen.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::diagnostics::{AppStateEvent, DiagnosticsCollector, UserAction, WarningType};
use crate::domain::asset::AssetRecord;
use crate::infrastructure::{FsCatalog, JsonMetadataStore};
use crate::ui::design_tokens::sizing;
use crate::ui::focus::FocusState;
use crate::ui::grid::{self, GridState};
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use crate::ui::toolbar;
use config::Config;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    config: Config,
    /// Settings directory used when saving; `None` resolves the default.
    config_dir: Option<PathBuf>,
    catalog: Arc<FsCatalog>,
    grid: GridState,
    focus: FocusState,
    /// Current snapshot, replaced wholesale by each listing.
    records: Vec<AssetRecord>,
    current_directory: Option<PathBuf>,
    search: String,
    /// Raw text of the tag filter field.
    tag_filter: String,
    /// Id of the latest listing request; older responses are dropped.
    list_generation: u64,
    loading: bool,
    fallback_reported: bool,
    theme_mode: ThemeMode,
    notifications: notifications::Manager,
    diagnostics: DiagnosticsCollector,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("current_directory", &self.current_directory)
            .field("records", &self.records.len())
            .field("focus_open", &self.focus.is_open())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Opens the on-disk metadata store. An unreadable file falls back to an
/// in-memory store and returns the reason.
fn open_metadata_store() -> (JsonMetadataStore, Option<String>) {
    match paths::metadata_file_with_override(None) {
        Some(path) => match JsonMetadataStore::open(path) {
            Ok(store) => (store, None),
            Err(err) => (JsonMetadataStore::in_memory(), Some(err.to_string())),
        },
        None => (JsonMetadataStore::in_memory(), None),
    }
}

impl App {
    /// Loads settings and metadata, then lists the startup directory: the
    /// CLI argument if given, otherwise the last directory of the previous
    /// session.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let (store, store_warning) = open_metadata_store();

        let mut app = Self::from_parts(config, Arc::new(store), None);

        if let Some(key) = config_warning {
            app.notifications.push(
                Notification::warning(&key).with_warning_type(WarningType::ConfigurationIssue),
            );
        }
        if let Some(detail) = store_warning {
            app.notifications.push(
                Notification::warning("notification-metadata-load-error")
                    .with_arg("detail", detail)
                    .with_warning_type(WarningType::MetadataIssue),
            );
        }

        let directory = flags
            .directory
            .map(PathBuf::from)
            .or_else(|| app.config.library.last_directory.clone());

        let task = match directory {
            Some(directory) => {
                app.diagnostics.log_action(UserAction::OpenDirectory {
                    source: Some("startup".to_string()),
                });
                app.list_directory(directory)
            }
            None => Task::none(),
        };

        (app, task)
    }

    /// Builds the application around an already loaded configuration and
    /// metadata store.
    fn from_parts(
        config: Config,
        store: Arc<JsonMetadataStore>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let catalog = FsCatalog::new(store)
            .with_gallery(config.gallery_settings())
            .with_thresholds(config.thresholds());

        let mut grid = GridState::new(config.geometry_calculator(), config.grid_zoom());
        grid.resize(grid::content_size(Size::new(
            WINDOW_DEFAULT_WIDTH as f32,
            WINDOW_DEFAULT_HEIGHT as f32 - sizing::TOOLBAR_HEIGHT,
        )));

        let focus = FocusState::new(config.auto_open_gallery(), config.max_view_scale());

        let mut diagnostics = DiagnosticsCollector::default();
        let mut notifications = notifications::Manager::new();
        notifications.set_diagnostics(diagnostics.handle());
        diagnostics.log_state(AppStateEvent::ConfigApplied);

        Self {
            theme_mode: config.general.theme_mode,
            config,
            config_dir,
            catalog: Arc::new(catalog),
            grid,
            focus,
            records: Vec::new(),
            current_directory: None,
            search: String::new(),
            tag_filter: String::new(),
            list_generation: 0,
            loading: false,
            fallback_reported: false,
            notifications,
            diagnostics,
        }
    }

    fn title(&self) -> String {
        toolbar::window_title(self.current_directory.as_deref())
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let frame_sub = subscription::create_frame_subscription(self.grid.has_pending_render());
        let tick_sub =
            subscription::create_tick_subscription(self.notifications.has_notifications());

        Subscription::batch([event_sub, frame_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        self.dispatch(message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            toolbar: toolbar::ViewContext {
                directory: self.current_directory.as_deref(),
                search: &self.search,
                tag_filter: &self.tag_filter,
                sort_key: self.config.grid.sort_key.unwrap_or_default(),
                sort_order: self.config.grid.sort_order.unwrap_or_default(),
                show_hidden: self.config.grid.show_hidden_files.unwrap_or(false),
                hide_folders: self.config.grid.hide_folders.unwrap_or(false),
                include_subfolders: self.config.grid.show_subfolder_content.unwrap_or(false),
                zoom: self.grid.zoom(),
                asset_count: self.records.len(),
                loading: self.loading,
            },
            grid: &self.grid,
            focus: &self.focus,
            records: &self.records,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{AssetListing, SortOrder};
    use crate::diagnostics::{AppOperation, DiagnosticEventKind};
    use crate::domain::asset::{Category, TagSet};
    use crate::error::CatalogError;
    use crate::test_utils::{dir, file, lora};
    use crate::ui::focus;
    use iced::keyboard::{Key, Modifiers};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn test_app() -> (App, TempDir) {
        let config_dir = tempdir().expect("failed to create temp dir");
        let app = App::from_parts(
            Config::default(),
            Arc::new(JsonMetadataStore::in_memory()),
            Some(config_dir.path().to_path_buf()),
        );
        (app, config_dir)
    }

    /// Delivers a successful listing for the latest request.
    fn deliver(app: &mut App, directory: &str, records: Vec<AssetRecord>) {
        let request = app.list_generation;
        let _ = app.update(Message::AssetsListed {
            request,
            result: Ok(AssetListing {
                directory: PathBuf::from(directory),
                records,
            }),
            duration_ms: 3,
        });
    }

    fn numbered(count: usize) -> Vec<AssetRecord> {
        (0..count)
            .map(|i| file(&format!("/models/asset-{i:03}.safetensors")))
            .collect()
    }

    fn has_event(app: &App, predicate: impl Fn(&DiagnosticEventKind) -> bool) -> bool {
        app.diagnostics.iter().any(|event| predicate(&event.kind))
    }

    fn key(c: &str) -> Message {
        Message::KeyPressed {
            key: Key::Character(c.into()),
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn starts_without_directory() {
        let (app, _dir) = test_app();
        assert!(app.current_directory.is_none());
        assert!(app.records.is_empty());
        assert!(!app.focus.is_open());
        assert_eq!(app.title(), "AssetLens");
    }

    #[test]
    fn listing_replaces_snapshot_and_renders_window() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        assert!(app.loading);

        deliver(&mut app, "/models", numbered(500));

        assert!(!app.loading);
        assert_eq!(app.records.len(), 500);
        assert_eq!(app.current_directory.as_deref(), Some(Path::new("/models")));
        assert!(!app.grid.renderer().cells().is_empty());
        assert!(app.grid.renderer().cells().len() < 500);
        assert!(has_event(&app, |kind| matches!(
            kind,
            DiagnosticEventKind::Operation {
                operation: AppOperation::GridRender { start: 0, forced: true, .. }
            }
        )));
        assert_eq!(app.title(), "models - AssetLens");
    }

    #[test]
    fn stale_listing_is_dropped() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/a"));
        let _ = app.list_directory(PathBuf::from("/b"));

        let _ = app.update(Message::AssetsListed {
            request: 1,
            result: Ok(AssetListing {
                directory: PathBuf::from("/a"),
                records: numbered(3),
            }),
            duration_ms: 1,
        });

        assert!(app.records.is_empty());
        assert!(app.current_directory.is_none());
        assert!(app.loading);
    }

    #[test]
    fn listing_failure_shows_notification_and_keeps_snapshot() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(4));

        let _ = app.list_directory(PathBuf::from("/missing"));
        let request = app.list_generation;
        let _ = app.update(Message::AssetsListed {
            request,
            result: Err(CatalogError::DirectoryNotFound("/missing".into())),
            duration_ms: 0,
        });

        assert_eq!(app.records.len(), 4);
        assert_eq!(app.current_directory.as_deref(), Some(Path::new("/models")));
        assert!(app.notifications.has_notifications());
    }

    #[test]
    fn new_directory_is_remembered_in_settings() {
        let (mut app, config_dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(2));

        let (saved, warning) = config::load_with_override(Some(config_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(saved.library.last_directory, Some(PathBuf::from("/models")));
    }

    #[test]
    fn cell_press_focuses_asset() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(10));

        let _ = app.update(Message::Grid(grid::Message::CellPressed(3)));

        assert!(app.focus.is_open());
        assert_eq!(app.focus.selected_index(), Some(3));
        assert!(has_event(&app, |kind| matches!(
            kind,
            DiagnosticEventKind::UserAction {
                action: UserAction::FocusAsset,
                ..
            }
        )));
    }

    #[test]
    fn arrow_key_navigation_is_logged_as_navigation() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(10));
        let _ = app.update(Message::Grid(grid::Message::CellPressed(3)));

        let _ = app.update(Message::KeyPressed {
            key: Key::Named(iced::keyboard::key::Named::ArrowRight),
            modifiers: Modifiers::default(),
        });

        assert_eq!(app.focus.selected_index(), Some(4));
        assert!(has_event(&app, |kind| matches!(
            kind,
            DiagnosticEventKind::UserAction {
                action: UserAction::NavigateNext,
                ..
            }
        )));
    }

    #[test]
    fn directory_cell_lists_that_directory() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(
            &mut app,
            "/models",
            vec![dir("/models/loras"), file("/models/a.safetensors")],
        );
        let generation = app.list_generation;

        let _ = app.update(Message::Grid(grid::Message::CellPressed(0)));

        assert!(!app.focus.is_open());
        assert_eq!(app.list_generation, generation + 1);
        assert!(app.loading);
    }

    #[test]
    fn stale_gallery_response_is_logged_and_ignored() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(
            &mut app,
            "/models",
            vec![lora("/models/first.safetensors"), lora("/models/second.safetensors")],
        );

        let effect = app.focus.handle_message(
            focus::Message::Select(0),
            focus::FocusContext::new(&app.records, app.config.visibility_filter(), &*app.catalog),
        );
        let first = match effect {
            focus::Effect::Focused {
                fetch: Some(fetch), ..
            } => fetch,
            other => panic!("expected a gallery fetch, got {other:?}"),
        };
        let _ = app.update(Message::Grid(grid::Message::CellPressed(1)));

        let _ = app.update(Message::GalleryFetched {
            request: first.request,
            asset_path: first.asset_path,
            result: Ok(vec![PathBuf::from("/out/first-1.png")]),
            duration_ms: 2,
        });

        assert!(app.focus.gallery_images().is_empty());
        assert!(app.focus.is_gallery_pending());
        assert!(has_event(&app, |kind| matches!(
            kind,
            DiagnosticEventKind::AppState {
                state: AppStateEvent::StaleGalleryResponse { .. }
            }
        )));
    }

    #[test]
    fn rating_key_writes_metadata() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(3));
        let _ = app.update(Message::Grid(grid::Message::CellPressed(1)));

        let _ = app.update(key("4"));

        let stored = app
            .catalog
            .store()
            .get(Path::new("/models/asset-001.safetensors"))
            .expect("metadata should be stored");
        assert_eq!(stored.rating_map().get("overall").value(), 4);
        assert!(app.loading, "a rating refreshes the listing");
    }

    #[test]
    fn hide_key_marks_asset_hidden() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(3));
        let _ = app.update(Message::Grid(grid::Message::CellPressed(0)));

        let _ = app.update(key("h"));

        let stored = app
            .catalog
            .store()
            .get(Path::new("/models/asset-000.safetensors"))
            .expect("metadata should be stored");
        assert!(stored.is_hidden);
    }

    #[test]
    fn tag_filter_relists_with_required_tags() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(2));
        let generation = app.list_generation;

        let _ = app.update(Message::Toolbar(toolbar::Message::TagFilterChanged(
            "Anime, style".to_string(),
        )));
        assert_eq!(app.list_generation, generation + 1);
        let request =
            app.config
                .list_request("/models", &app.search, TagSet::from_csv(&app.tag_filter));
        assert_eq!(request.filters.tags.to_csv(), "anime,style");

        // same tag set with different spacing does not list again
        let _ = app.update(Message::Toolbar(toolbar::Message::TagFilterChanged(
            "style,anime".to_string(),
        )));
        assert_eq!(app.list_generation, generation + 1);
    }

    #[test]
    fn details_save_writes_tags_notes_and_keyword() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(3));
        let _ = app.update(Message::Grid(grid::Message::CellPressed(1)));

        for (field, value) in [
            (focus::MetadataField::Tags, "Anime, style"),
            (focus::MetadataField::Notes, "needs a rerun"),
            (focus::MetadataField::GalleryKeyword, "knight"),
        ] {
            let _ = app.update(Message::Focus(focus::Message::EditField(
                field,
                value.to_string(),
            )));
        }
        let _ = app.update(Message::Focus(focus::Message::SaveMetadata));

        let stored = app
            .catalog
            .store()
            .get(Path::new("/models/asset-001.safetensors"))
            .expect("metadata should be stored");
        assert_eq!(stored.tag_set().to_csv(), "anime,style");
        assert_eq!(stored.notes, "needs a rerun");
        assert_eq!(stored.gallery_keyword(), Some("knight"));
        assert!(app.loading, "saving refreshes the listing");
        assert!(has_event(&app, |kind| matches!(
            kind,
            DiagnosticEventKind::UserAction {
                action: UserAction::EditMetadata,
                ..
            }
        )));
    }

    #[test]
    fn category_pick_is_stored_as_manual_and_can_be_cleared() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", vec![lora("/models/style.safetensors")]);
        let _ = app.update(Message::Grid(grid::Message::CellPressed(0)));

        let _ = app.update(Message::Focus(focus::Message::CategorySelected(
            focus::CategoryChoice::Manual(Category::Checkpoint),
        )));
        let path = Path::new("/models/style.safetensors");
        let stored = app.catalog.store().get(path).expect("stored");
        assert_eq!(stored.parsed_category(), Some(Category::Checkpoint));
        assert!(stored.is_category_manual);

        let mut manual = lora("/models/style.safetensors");
        manual.category = Some(Category::Checkpoint);
        manual.is_category_manual = true;
        deliver(&mut app, "/models", vec![manual]);

        let _ = app.update(Message::Focus(focus::Message::CategorySelected(
            focus::CategoryChoice::Automatic,
        )));
        let stored = app.catalog.store().get(path).expect("stored");
        assert_eq!(stored.parsed_category(), None);
        assert!(!stored.is_category_manual);
    }

    #[test]
    fn refreshed_gallery_keyword_starts_a_new_lookup() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", vec![lora("/models/style.safetensors")]);

        let effect = app.focus.handle_message(
            focus::Message::Select(0),
            focus::FocusContext::new(&app.records, app.config.visibility_filter(), &*app.catalog),
        );
        let focus::Effect::Focused {
            fetch: Some(first), ..
        } = &effect
        else {
            panic!("expected a gallery fetch, got {effect:?}");
        };
        let loaded = |fetch: &focus::GalleryFetch| Message::GalleryFetched {
            request: fetch.request,
            asset_path: fetch.asset_path.clone(),
            result: Ok(vec![PathBuf::from("/out/style-1.png")]),
            duration_ms: 1,
        };
        let _ = app.update(loaded(first));
        assert_eq!(app.focus.gallery_images().len(), 1);

        let mut renamed = lora("/models/style.safetensors");
        renamed.custom_gallery_keyword = Some("knight".to_string());
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", vec![renamed]);

        assert!(app.focus.is_open());
        assert!(app.focus.gallery_images().is_empty());
        assert!(app.focus.is_gallery_pending());

        // the answer for the old keyword is stale now
        let _ = app.update(loaded(first));
        assert!(app.focus.gallery_images().is_empty());
    }

    #[test]
    fn zoom_change_is_persisted() {
        let (mut app, config_dir) = test_app();

        let _ = app.update(Message::Toolbar(toolbar::Message::ZoomChanged(150.0)));

        assert!((app.grid.zoom().value() - 150.0).abs() < f32::EPSILON);
        let (saved, _) = config::load_with_override(Some(config_dir.path().to_path_buf()));
        assert_eq!(saved.grid.zoom_percent, Some(150.0));
    }

    #[test]
    fn sort_order_toggle_persists_and_relists() {
        let (mut app, config_dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(2));
        let generation = app.list_generation;

        let _ = app.update(Message::Toolbar(toolbar::Message::ToggleSortOrder));

        assert_eq!(app.list_generation, generation + 1);
        let (saved, _) = config::load_with_override(Some(config_dir.path().to_path_buf()));
        assert_eq!(saved.grid.sort_order, Some(SortOrder::Descending));
    }

    #[test]
    fn parent_directory_without_directory_notifies() {
        let (mut app, _dir) = test_app();

        let _ = app.update(Message::Toolbar(toolbar::Message::ParentDirectory));

        assert!(app.notifications.has_notifications());
        assert_eq!(app.list_generation, 0);
    }

    #[test]
    fn escape_closes_focus() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(3));
        let _ = app.update(Message::Grid(grid::Message::CellPressed(0)));

        let _ = app.update(Message::KeyPressed {
            key: Key::Named(iced::keyboard::key::Named::Escape),
            modifiers: Modifiers::default(),
        });

        assert!(!app.focus.is_open());
    }

    #[test]
    fn focused_asset_that_disappears_closes_focus() {
        let (mut app, _dir) = test_app();
        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(3));
        let _ = app.update(Message::Grid(grid::Message::CellPressed(2)));

        let _ = app.list_directory(PathBuf::from("/models"));
        deliver(&mut app, "/models", numbered(2));

        assert!(!app.focus.is_open());
        assert!(has_event(&app, |kind| matches!(
            kind,
            DiagnosticEventKind::AppState {
                state: AppStateEvent::FocusLost
            }
        )));
    }
}
