// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Component messages are forwarded to their state machines; the effects
//! they return are turned into catalog tasks, metadata writes, diagnostics
//! and notifications here.

use super::{config, App, Message};
use crate::application::port::AssetCatalog;
use crate::application::query::Direction;
use crate::diagnostics::{
    AppOperation, AppStateEvent, ErrorType, ExportError, UserAction, WarningEvent, WarningType,
};
use crate::domain::asset::{Category, Rating, Ratings, TagSet};
use crate::error::CatalogError;
use crate::infrastructure::filesystem::parent_directory;
use crate::infrastructure::MetadataUpdate;
use crate::ui::design_tokens::sizing;
use crate::ui::focus::{self, FocusContext, GalleryFetch, GalleryRequest, MetadataEdits};
use crate::ui::grid::{self, RenderOutcome};
use crate::ui::notifications::{messages::catalog_detail, Notification, NotificationMessage};
use crate::ui::state::ZoomDirection;
use crate::ui::toolbar;
use iced::keyboard::{key::Named, Key, Modifiers};
use iced::{Size, Task};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Sibling direction a focus message asks for, if any. Used to tell
/// navigation apart from a plain click when the effect comes back.
fn navigation_direction(message: &focus::Message) -> Option<Direction> {
    match message {
        focus::Message::Navigate { direction, .. } => Some(*direction),
        focus::Message::KeyPressed {
            key: Key::Named(Named::ArrowRight),
            ..
        } => Some(Direction::Next),
        focus::Message::KeyPressed {
            key: Key::Named(Named::ArrowLeft),
            ..
        } => Some(Direction::Previous),
        _ => None,
    }
}

impl App {
    pub(super) fn dispatch(&mut self, message: Message) -> Task<Message> {
        self.diagnostics.process_pending();

        match message {
            Message::Grid(grid_message) => self.handle_grid_message(grid_message),
            Message::Focus(focus_message) => self.handle_focus_message(focus_message),
            Message::Toolbar(toolbar_message) => self.handle_toolbar_message(toolbar_message),
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::AssetsListed {
                request,
                result,
                duration_ms,
            } => self.handle_assets_listed(request, result, duration_ms),
            Message::GalleryFetched {
                request,
                asset_path,
                result,
                duration_ms,
            } => self.handle_gallery_fetched(request, asset_path, result, duration_ms),
            Message::FolderPicked(Some(path)) => {
                self.diagnostics.log_action(UserAction::OpenDirectory {
                    source: Some("dialog".to_string()),
                });
                self.enter_directory(path)
            }
            Message::FolderPicked(None) => Task::none(),
            Message::KeyPressed { key, modifiers } => self.handle_key(key, modifiers),
            Message::WindowResized(size) => {
                self.handle_window_resized(size);
                Task::none()
            }
            Message::Frame(_) => {
                let filter = self.config.visibility_filter();
                if let Some(outcome) = self.grid.on_frame(&self.records, filter) {
                    self.log_render(&outcome);
                }
                Task::none()
            }
            Message::Tick(_) => {
                self.notifications.handle_message(&NotificationMessage::Tick);
                Task::none()
            }
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Starts a background listing of `directory`. Any listing still in
    /// flight becomes stale.
    pub(super) fn list_directory(&mut self, directory: PathBuf) -> Task<Message> {
        self.list_generation += 1;
        let request_id = self.list_generation;
        self.loading = true;

        let request = self.config.list_request(
            directory,
            &self.search,
            TagSet::from_csv(&self.tag_filter),
        );
        let catalog = Arc::clone(&self.catalog);

        Task::perform(
            async move {
                let started = Instant::now();
                let result = tokio::task::spawn_blocking(move || catalog.list_assets(&request))
                    .await
                    .unwrap_or_else(|err| Err(CatalogError::Io(err.to_string())));
                (result, millis(started.elapsed()))
            },
            move |(result, duration_ms)| Message::AssetsListed {
                request: request_id,
                result,
                duration_ms,
            },
        )
    }

    /// Lists the current directory again with the current settings.
    fn relist(&mut self) -> Task<Message> {
        match self.current_directory.clone() {
            Some(directory) => self.list_directory(directory),
            None => Task::none(),
        }
    }

    fn refresh(&mut self) -> Task<Message> {
        if self.current_directory.is_none() {
            self.notifications
                .push(Notification::info("notification-no-directory"));
            return Task::none();
        }
        self.relist()
    }

    fn enter_directory(&mut self, directory: PathBuf) -> Task<Message> {
        if self.focus.close() == focus::Effect::Closed {
            self.diagnostics.log_action(UserAction::CloseFocus);
        }
        self.search.clear();
        self.list_directory(directory)
    }

    fn navigate_up(&mut self) -> Task<Message> {
        self.diagnostics.log_action(UserAction::NavigateUp);
        let Some(current) = self.current_directory.clone() else {
            self.notifications
                .push(Notification::info("notification-no-directory"));
            return Task::none();
        };
        match parent_directory(&current) {
            Some(parent) => self.enter_directory(parent),
            None => {
                self.notifications
                    .push(Notification::info("notification-parent-unavailable"));
                Task::none()
            }
        }
    }

    fn handle_assets_listed(
        &mut self,
        request: u64,
        result: Result<crate::application::port::AssetListing, CatalogError>,
        duration_ms: u64,
    ) -> Task<Message> {
        if request != self.list_generation {
            return Task::none();
        }
        self.loading = false;

        let listing = match result {
            Ok(listing) => listing,
            Err(err) => {
                self.notify_catalog_error(&err);
                return Task::none();
            }
        };

        let count = listing.count();
        self.diagnostics
            .log_operation(AppOperation::ListAssets { count, duration_ms });

        let directory_changed =
            self.current_directory.as_deref() != Some(listing.directory.as_path());
        self.current_directory = Some(listing.directory);
        self.records = listing.records;
        self.diagnostics
            .log_state(AppStateEvent::SnapshotReplaced { count });
        self.notifications.clear_catalog_errors();

        let filter = self.config.visibility_filter();
        let gallery = match self
            .focus
            .sync_with_snapshot(FocusContext::new(&self.records, filter, &*self.catalog))
        {
            focus::Effect::Closed => {
                self.diagnostics.log_state(AppStateEvent::FocusLost);
                Task::none()
            }
            focus::Effect::GalleryReset { fetch: Some(fetch) } => self.fetch_gallery(fetch),
            _ => Task::none(),
        };

        let scroll = if directory_changed {
            self.config.library.last_directory = self.current_directory.clone();
            self.persist_config();
            self.grid.scroll_to_top().map(Message::Grid)
        } else {
            Task::none()
        };

        let outcome = self.grid.render_now(&self.records, filter, true);
        self.log_render(&outcome);
        Task::batch([scroll, gallery])
    }

    fn notify_catalog_error(&mut self, err: &CatalogError) {
        self.notifications.push(
            Notification::error(err.message_key())
                .with_arg("detail", catalog_detail(err))
                .with_error_type(ErrorType::from(err)),
        );
    }

    // =========================================================================
    // Grid
    // =========================================================================

    fn handle_grid_message(&mut self, message: grid::Message) -> Task<Message> {
        let effect = self.grid.handle_message(message, self.records.len());
        self.check_geometry_fallback();

        match effect {
            grid::Effect::None => Task::none(),
            grid::Effect::Select(index) => self.handle_focus_message(focus::Message::Select(index)),
            grid::Effect::ZoomChanged(zoom) => {
                self.diagnostics.log_action(UserAction::SetGridZoom {
                    percent: zoom.value(),
                });
                self.config.grid.zoom_percent = Some(zoom.value());
                self.persist_config();
                Task::none()
            }
        }
    }

    fn handle_window_resized(&mut self, size: Size) {
        let available = grid::content_size(Size::new(
            size.width,
            (size.height - sizing::TOOLBAR_HEIGHT).max(0.0),
        ));
        if self.grid.resize(available) {
            self.grid.schedule_render(self.records.len(), true);
        }
        self.check_geometry_fallback();
    }

    fn log_render(&mut self, outcome: &RenderOutcome) {
        if let RenderOutcome::Rebuilt {
            range,
            forced,
            placeholders,
            elapsed,
        } = outcome
        {
            self.diagnostics.log_operation(AppOperation::GridRender {
                start: range.start,
                end: range.end,
                forced: *forced,
                placeholders: *placeholders,
                duration_ms: millis(*elapsed),
            });
        }
    }

    /// Logs once each time the layout switches to the fallback cell size.
    fn check_geometry_fallback(&mut self) {
        let used_fallback = self.grid.viewport().used_fallback;
        if used_fallback && !self.fallback_reported {
            self.diagnostics.handle().log_warning(WarningEvent::new(
                WarningType::GeometryFallback,
                "cell measurement unavailable, using the fallback cell size",
            ));
        }
        self.fallback_reported = used_fallback;
    }

    // =========================================================================
    // Focus
    // =========================================================================

    fn handle_focus_message(&mut self, message: focus::Message) -> Task<Message> {
        let navigation = navigation_direction(&message);
        let filter = self.config.visibility_filter();
        let effect = self.focus.handle_message(
            message,
            FocusContext::new(&self.records, filter, &*self.catalog),
        );
        self.apply_focus_effect(effect, navigation)
    }

    fn apply_focus_effect(
        &mut self,
        effect: focus::Effect,
        navigation: Option<Direction>,
    ) -> Task<Message> {
        match effect {
            focus::Effect::None => Task::none(),
            focus::Effect::Focused { index, fetch } => {
                let action = match navigation {
                    Some(Direction::Next) => UserAction::NavigateNext,
                    Some(Direction::Previous) => UserAction::NavigatePrevious,
                    None => UserAction::FocusAsset,
                };
                self.diagnostics.log_action(action);

                let reveal = self
                    .grid
                    .reveal(index, self.records.len())
                    .map(Message::Grid);
                match fetch {
                    Some(fetch) => Task::batch([reveal, self.fetch_gallery(fetch)]),
                    None => reveal,
                }
            }
            focus::Effect::GalleryImageShown(index) => {
                self.diagnostics
                    .log_action(UserAction::OpenGalleryImage { index });
                Task::none()
            }
            focus::Effect::ReturnedToAsset => {
                self.diagnostics.log_action(UserAction::ReturnToAsset);
                Task::none()
            }
            focus::Effect::GalleryLoaded { count, auto_opened } => {
                self.diagnostics
                    .log_state(AppStateEvent::GalleryLoaded { count, auto_opened });
                Task::none()
            }
            focus::Effect::GalleryFailed(err) => {
                self.notifications.push(
                    Notification::error("notification-gallery-failed")
                        .with_arg("detail", catalog_detail(&err))
                        .with_error_type(ErrorType::from(&err)),
                );
                Task::none()
            }
            focus::Effect::StaleGalleryResponse(request) => {
                self.diagnostics
                    .log_state(AppStateEvent::StaleGalleryResponse {
                        request: request.value(),
                    });
                Task::none()
            }
            focus::Effect::EnterDirectory(path) => {
                self.diagnostics.log_action(UserAction::OpenDirectory {
                    source: Some("grid".to_string()),
                });
                self.search.clear();
                self.list_directory(path)
            }
            focus::Effect::Zoomed(direction) => {
                self.diagnostics.log_action(match direction {
                    ZoomDirection::In => UserAction::ZoomIn,
                    ZoomDirection::Out => UserAction::ZoomOut,
                });
                Task::none()
            }
            focus::Effect::Closed => {
                self.diagnostics.log_action(UserAction::CloseFocus);
                Task::none()
            }
            focus::Effect::Rate { path, rating } => self.rate_asset(&path, rating),
            focus::Effect::SetHidden { path, hidden } => self.set_hidden(&path, hidden),
            focus::Effect::SaveMetadata { path, edits } => self.save_metadata(&path, edits),
            focus::Effect::SetCategory { path, category } => self.set_category(&path, category),
            focus::Effect::GalleryReset { fetch } => match fetch {
                Some(fetch) => self.fetch_gallery(fetch),
                None => Task::none(),
            },
        }
    }

    fn fetch_gallery(&self, fetch: GalleryFetch) -> Task<Message> {
        let GalleryFetch {
            request,
            asset_path,
            custom_keyword,
        } = fetch;
        let catalog = Arc::clone(&self.catalog);

        Task::perform(
            async move {
                let started = Instant::now();
                let path = asset_path.clone();
                let result = tokio::task::spawn_blocking(move || {
                    catalog.fetch_gallery_images(&path, custom_keyword.as_deref())
                })
                .await
                .unwrap_or_else(|err| Err(CatalogError::Io(err.to_string())));
                (asset_path, result, millis(started.elapsed()))
            },
            move |(asset_path, result, duration_ms)| Message::GalleryFetched {
                request,
                asset_path,
                result,
                duration_ms,
            },
        )
    }

    fn handle_gallery_fetched(
        &mut self,
        request: GalleryRequest,
        asset_path: PathBuf,
        result: Result<Vec<PathBuf>, CatalogError>,
        duration_ms: u64,
    ) -> Task<Message> {
        if let Ok(images) = &result {
            self.diagnostics.log_operation(AppOperation::GalleryFetch {
                count: images.len(),
                duration_ms,
            });
        }
        self.handle_focus_message(focus::Message::GalleryLoaded {
            request,
            asset_path,
            result,
        })
    }

    // =========================================================================
    // Metadata edits
    // =========================================================================

    fn rate_asset(&mut self, path: &Path, rating: Rating) -> Task<Message> {
        self.diagnostics.log_action(UserAction::SetRating {
            value: rating.value(),
        });

        let mut ratings = Ratings::new();
        ratings.set(self.config.rating_category(), i64::from(rating.value()));
        let update = MetadataUpdate {
            ratings: Some(ratings),
            ..MetadataUpdate::default()
        };

        match self.catalog.store().upsert(path, update) {
            Ok(_) => {
                self.notifications.push(
                    Notification::success("notification-rating-saved")
                        .with_arg("name", file_name(path))
                        .with_arg("rating", rating.value().to_string()),
                );
                self.relist()
            }
            Err(err) => {
                self.notify_metadata_error(&err);
                Task::none()
            }
        }
    }

    fn set_hidden(&mut self, path: &Path, hidden: bool) -> Task<Message> {
        self.diagnostics.log_action(UserAction::SetHidden { hidden });

        let update = MetadataUpdate {
            is_hidden: Some(hidden),
            ..MetadataUpdate::default()
        };

        match self.catalog.store().upsert(path, update) {
            Ok(_) => {
                let key = if hidden {
                    "notification-asset-hidden"
                } else {
                    "notification-asset-shown"
                };
                self.notifications
                    .push(Notification::info(key).with_arg("name", file_name(path)));
                self.relist()
            }
            Err(err) => {
                self.notify_metadata_error(&err);
                Task::none()
            }
        }
    }

    fn save_metadata(&mut self, path: &Path, edits: MetadataEdits) -> Task<Message> {
        self.diagnostics.log_action(UserAction::EditMetadata);

        let update = MetadataUpdate {
            tags: Some(edits.tags),
            notes: Some(edits.notes),
            custom_gallery_keyword: Some(edits.gallery_keyword),
            ..MetadataUpdate::default()
        };

        match self.catalog.store().upsert(path, update) {
            Ok(_) => {
                self.notifications.push(
                    Notification::success("notification-metadata-saved")
                        .with_arg("name", file_name(path)),
                );
                self.relist()
            }
            Err(err) => {
                self.notify_metadata_error(&err);
                Task::none()
            }
        }
    }

    /// Files the asset under `category` by hand, or returns it to automatic
    /// categorization when `None`.
    fn set_category(&mut self, path: &Path, category: Option<Category>) -> Task<Message> {
        self.diagnostics.log_action(UserAction::SetCategory {
            category: category.map(|c| c.as_str().to_string()),
        });

        match self.catalog.store().set_category(path, category, true) {
            Ok(()) => {
                let notification = match category {
                    Some(category) => Notification::info("notification-category-set")
                        .with_arg("category", category.as_str()),
                    None => Notification::info("notification-category-cleared"),
                };
                self.notifications
                    .push(notification.with_arg("name", file_name(path)));
                self.relist()
            }
            Err(err) => {
                self.notify_metadata_error(&err);
                Task::none()
            }
        }
    }

    fn notify_metadata_error(&mut self, err: &crate::error::Error) {
        self.notifications.push(
            Notification::error("notification-metadata-save-error")
                .with_arg("detail", err.to_string())
                .with_error_type(ErrorType::MetadataError),
        );
    }

    // =========================================================================
    // Toolbar and keyboard
    // =========================================================================

    fn handle_toolbar_message(&mut self, message: toolbar::Message) -> Task<Message> {
        match message {
            toolbar::Message::OpenFolder => self.open_folder_dialog(),
            toolbar::Message::ParentDirectory => self.navigate_up(),
            toolbar::Message::Refresh => {
                self.diagnostics.log_action(UserAction::Refresh);
                self.refresh()
            }
            toolbar::Message::SearchChanged(search) => {
                self.search = search;
                self.diagnostics.log_action(UserAction::ChangeFilter);
                self.relist()
            }
            toolbar::Message::TagFilterChanged(tags) => {
                let changed = TagSet::from_csv(&tags) != TagSet::from_csv(&self.tag_filter);
                self.tag_filter = tags;
                if !changed {
                    return Task::none();
                }
                self.diagnostics.log_action(UserAction::ChangeFilter);
                self.relist()
            }
            toolbar::Message::SortKeySelected(key) => {
                self.config.grid.sort_key = Some(key);
                self.diagnostics.log_action(UserAction::ChangeSort);
                self.persist_config();
                self.relist()
            }
            toolbar::Message::ToggleSortOrder => {
                let order = self.config.grid.sort_order.unwrap_or_default().toggled();
                self.config.grid.sort_order = Some(order);
                self.diagnostics.log_action(UserAction::ChangeSort);
                self.persist_config();
                self.relist()
            }
            toolbar::Message::ShowHiddenToggled(show) => {
                self.config.grid.show_hidden_files = Some(show);
                self.filters_changed()
            }
            toolbar::Message::HideFoldersToggled(hide) => {
                self.config.grid.hide_folders = Some(hide);
                self.filters_changed()
            }
            toolbar::Message::SubfoldersToggled(include) => {
                self.config.grid.show_subfolder_content = Some(include);
                self.filters_changed()
            }
            toolbar::Message::ZoomChanged(percent) => {
                self.handle_grid_message(grid::Message::ZoomChanged(percent))
            }
            toolbar::Message::ExportDiagnostics => {
                self.export_diagnostics();
                Task::none()
            }
        }
    }

    fn filters_changed(&mut self) -> Task<Message> {
        self.diagnostics.log_action(UserAction::ChangeFilter);
        self.persist_config();
        self.relist()
    }

    fn open_folder_dialog(&self) -> Task<Message> {
        let start = self.current_directory.clone();
        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new().set_title("Open folder");
                if let Some(dir) = start {
                    if dir.exists() {
                        dialog = dialog.set_directory(&dir);
                    }
                }
                dialog.pick_folder().await.map(|h| h.path().to_path_buf())
            },
            Message::FolderPicked,
        )
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Task<Message> {
        if self.focus.is_open() {
            return self.handle_focus_message(focus::Message::KeyPressed { key, modifiers });
        }

        match key.as_ref() {
            Key::Named(Named::F5) => {
                self.diagnostics.log_action(UserAction::Refresh);
                self.refresh()
            }
            Key::Named(Named::Backspace) => self.navigate_up(),
            Key::Character("o") if modifiers.command() => self.open_folder_dialog(),
            _ => Task::none(),
        }
    }

    fn export_diagnostics(&mut self) {
        self.diagnostics.log_action(UserAction::ExportDiagnostics);
        match self.diagnostics.export_with_dialog() {
            Ok(path) => self.notifications.push(
                Notification::success("notification-diagnostics-exported")
                    .with_arg("path", path.display().to_string()),
            ),
            Err(ExportError::Cancelled) => {}
            Err(err) => self.notifications.push(
                Notification::error("notification-diagnostics-export-error")
                    .with_arg("detail", err.to_string())
                    .with_error_type(ErrorType::IoError),
            ),
        }
    }

    /// Writes the settings, surfacing failures as a warning.
    pub(super) fn persist_config(&mut self) {
        if let Err(err) = config::save_with_override(&self.config, self.config_dir.clone()) {
            self.notifications.push(
                Notification::warning("notification-config-save-error")
                    .with_arg("detail", err.to_string())
                    .with_warning_type(WarningType::ConfigurationIssue),
            );
        }
    }
}
