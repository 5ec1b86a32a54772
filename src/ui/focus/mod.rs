// SPDX-License-Identifier: MPL-2.0
//! Focus viewer: one enlarged asset and the gallery discovered for it.
//!
//! [`FocusState`] moves between three modes ([`FocusMode`]): closed, showing
//! the asset's own preview, or showing one of its gallery images. Gallery
//! lookups run asynchronously. Each one carries a [`GalleryRequest`] id, and
//! a response is applied only while both its id and its asset path match the
//! lookup still pending, so a late answer for a previous asset is dropped.
//!
//! Switching the displayed media always resets the zoom/pan transform.
//!
//! The focused asset's tags, notes, gallery keyword and category are edited
//! in place through a [`MetadataEditorState`] draft.

pub mod canvas;
pub mod editor;
pub mod preview;
pub mod view;

pub use editor::{CategoryChoice, MetadataEdits, MetadataEditorState, MetadataField};
pub use preview::{contained_size, PreviewCache};
pub use view::view;

use crate::application::port::AssetCatalog;
use crate::application::query::{Direction, SiblingNavigator};
use crate::domain::asset::{AssetRecord, Category, Rating, VisibilityFilter};
use crate::domain::ui::MaxViewScale;
use crate::error::CatalogError;
use crate::ui::state::{TransformState, ZoomDirection};
use iced::keyboard::{self, key::Named, Key};
use iced::{Point, Size, Vector};
use std::path::{Path, PathBuf};

/// Pointer travel under which a press and release count as a click.
const CLICK_SLOP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    Closed,
    Asset,
    GalleryImage,
}

/// Identifier of one gallery lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GalleryRequest(u64);

impl GalleryRequest {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A gallery lookup the application has to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryFetch {
    pub request: GalleryRequest,
    pub asset_path: PathBuf,
    pub custom_keyword: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingGallery {
    request: GalleryRequest,
    asset_path: PathBuf,
}

/// Pointer input from the media canvas, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// One wheel step; `cursor_offset` is relative to the media's top-left corner.
    Wheel {
        direction: ZoomDirection,
        cursor_offset: Vector,
    },
    Pressed(Point),
    Moved(Point),
    Released(Point),
    /// Press outside the media.
    BackdropPressed,
    CursorLeft,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// A grid cell was clicked.
    Select(usize),
    /// A gallery thumbnail was clicked.
    OpenGalleryImage(usize),
    /// The displayed media itself was clicked.
    ClickFocusedImage,
    Navigate {
        direction: Direction,
        /// Step to a sibling asset even while a gallery image is shown.
        across_assets: bool,
    },
    KeyPressed {
        key: Key,
        modifiers: keyboard::Modifiers,
    },
    Close,
    GalleryLoaded {
        request: GalleryRequest,
        asset_path: PathBuf,
        result: Result<Vec<PathBuf>, CatalogError>,
    },
    Canvas(CanvasEvent),
    EditField(MetadataField, String),
    SaveMetadata,
    CategorySelected(CategoryChoice),
}

/// Side effects the application should perform after a focus message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// A new asset took focus. The grid should reveal `index`; `fetch` is set
    /// when a gallery lookup has to start.
    Focused {
        index: usize,
        fetch: Option<GalleryFetch>,
    },
    GalleryImageShown(usize),
    ReturnedToAsset,
    GalleryLoaded {
        count: usize,
        auto_opened: bool,
    },
    GalleryFailed(CatalogError),
    /// A response arrived for a lookup that is no longer current.
    StaleGalleryResponse(GalleryRequest),
    /// A directory was selected; focus is closed and it should be listed.
    EnterDirectory(PathBuf),
    Zoomed(ZoomDirection),
    Closed,
    Rate {
        path: PathBuf,
        rating: Rating,
    },
    SetHidden {
        path: PathBuf,
        hidden: bool,
    },
    SaveMetadata {
        path: PathBuf,
        edits: MetadataEdits,
    },
    /// `None` clears a manual category.
    SetCategory {
        path: PathBuf,
        category: Option<Category>,
    },
    /// A refresh changed what the gallery is searched for. The old images
    /// are gone; `fetch` is set when a new lookup has to start.
    GalleryReset { fetch: Option<GalleryFetch> },
}

/// What a focus transition may read: the current snapshot and the catalog
/// used to resolve fallback media.
#[derive(Clone, Copy)]
pub struct FocusContext<'a> {
    pub records: &'a [AssetRecord],
    pub filter: VisibilityFilter,
    pub catalog: &'a dyn AssetCatalog,
}

impl<'a> FocusContext<'a> {
    #[must_use]
    pub fn new(
        records: &'a [AssetRecord],
        filter: VisibilityFilter,
        catalog: &'a dyn AssetCatalog,
    ) -> Self {
        Self {
            records,
            filter,
            catalog,
        }
    }
}

/// Navigation state of the focus viewer.
#[derive(Debug)]
pub struct FocusState {
    selected_index: Option<usize>,
    focused_asset: Option<AssetRecord>,
    viewing_gallery_image: bool,
    gallery_images: Vec<PathBuf>,
    gallery_index: Option<usize>,
    pending_gallery: Option<PendingGallery>,
    next_request: u64,
    auto_open_gallery: bool,
    transform: TransformState,
    press_origin: Option<Point>,
    media_path: Option<PathBuf>,
    media_size: Option<Size>,
    previews: PreviewCache,
    editor: MetadataEditorState,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new(false, MaxViewScale::default())
    }
}

impl FocusState {
    #[must_use]
    pub fn new(auto_open_gallery: bool, max_scale: MaxViewScale) -> Self {
        Self {
            selected_index: None,
            focused_asset: None,
            viewing_gallery_image: false,
            gallery_images: Vec::new(),
            gallery_index: None,
            pending_gallery: None,
            next_request: 0,
            auto_open_gallery,
            transform: TransformState::new(max_scale),
            press_origin: None,
            media_path: None,
            media_size: None,
            previews: PreviewCache::default(),
            editor: MetadataEditorState::default(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> FocusMode {
        match (&self.focused_asset, self.viewing_gallery_image) {
            (None, _) => FocusMode::Closed,
            (Some(_), false) => FocusMode::Asset,
            (Some(_), true) => FocusMode::GalleryImage,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.focused_asset.is_some()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    #[must_use]
    pub fn focused_asset(&self) -> Option<&AssetRecord> {
        self.focused_asset.as_ref()
    }

    #[must_use]
    pub fn is_viewing_gallery_image(&self) -> bool {
        self.viewing_gallery_image
    }

    #[must_use]
    pub fn gallery_images(&self) -> &[PathBuf] {
        &self.gallery_images
    }

    #[must_use]
    pub fn gallery_index(&self) -> Option<usize> {
        self.gallery_index
    }

    /// Whether a gallery lookup for the focused asset is in flight.
    #[must_use]
    pub fn is_gallery_pending(&self) -> bool {
        self.pending_gallery.is_some()
    }

    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Path of the media currently displayed.
    #[must_use]
    pub fn media_path(&self) -> Option<&Path> {
        self.media_path.as_deref()
    }

    /// Natural pixel size of the displayed media, when its header could be read.
    #[must_use]
    pub fn media_size(&self) -> Option<Size> {
        self.media_size
    }

    #[must_use]
    pub fn auto_open_gallery(&self) -> bool {
        self.auto_open_gallery
    }

    #[must_use]
    pub fn editor(&self) -> &MetadataEditorState {
        &self.editor
    }

    pub fn handle_message(&mut self, message: Message, ctx: FocusContext<'_>) -> Effect {
        match message {
            Message::Select(index) => self.select(index, ctx),
            Message::OpenGalleryImage(index) => self.open_gallery_image(index, ctx),
            Message::ClickFocusedImage => self.click_focused_image(ctx),
            Message::Navigate {
                direction,
                across_assets,
            } => self.navigate(direction, across_assets, ctx),
            Message::KeyPressed { key, modifiers } => self.handle_key(&key, modifiers, ctx),
            Message::Close => self.close(),
            Message::GalleryLoaded {
                request,
                asset_path,
                result,
            } => self.apply_gallery(request, &asset_path, result, ctx),
            Message::Canvas(event) => self.handle_canvas(event, ctx),
            Message::EditField(field, value) => {
                if self.focused_asset.is_some() {
                    self.editor.set_field(field, value);
                }
                Effect::None
            }
            Message::SaveMetadata => self.save_metadata(),
            Message::CategorySelected(choice) => self.select_category(choice),
        }
    }

    /// Focuses the record at `index`. A directory closes focus instead and
    /// asks for that directory to be listed.
    fn select(&mut self, index: usize, ctx: FocusContext<'_>) -> Effect {
        let Some(record) = ctx.records.get(index) else {
            return Effect::None;
        };
        if record.is_directory {
            let path = record.path.clone();
            self.close();
            return Effect::EnterDirectory(path);
        }
        self.focus_asset(index, ctx)
    }

    fn focus_asset(&mut self, index: usize, ctx: FocusContext<'_>) -> Effect {
        let Some(record) = ctx.records.get(index) else {
            return Effect::None;
        };

        self.selected_index = Some(index);
        self.focused_asset = Some(record.clone());
        self.editor = MetadataEditorState::from_record(record);
        self.press_origin = None;

        let fetch = self.restart_gallery();
        self.media_changed(ctx.catalog);
        Effect::Focused { index, fetch }
    }

    /// Drops the current gallery and, when the focused asset qualifies,
    /// registers a new lookup.
    fn restart_gallery(&mut self) -> Option<GalleryFetch> {
        self.viewing_gallery_image = false;
        self.gallery_images.clear();
        self.gallery_index = None;
        self.pending_gallery = None;

        let record = self.focused_asset.as_ref()?;
        if !record.qualifies_for_gallery() {
            return None;
        }
        self.next_request += 1;
        let request = GalleryRequest(self.next_request);
        self.pending_gallery = Some(PendingGallery {
            request,
            asset_path: record.path.clone(),
        });
        Some(GalleryFetch {
            request,
            asset_path: record.path.clone(),
            custom_keyword: record.custom_gallery_keyword.clone(),
        })
    }

    fn save_metadata(&mut self) -> Effect {
        let Some(asset) = self.focused_asset.as_ref() else {
            return Effect::None;
        };
        match self.editor.pending_edits() {
            Some(edits) => Effect::SaveMetadata {
                path: asset.path.clone(),
                edits,
            },
            None => Effect::None,
        }
    }

    fn select_category(&mut self, choice: CategoryChoice) -> Effect {
        let Some(asset) = self.focused_asset.as_ref() else {
            return Effect::None;
        };
        if choice == CategoryChoice::of(asset) {
            return Effect::None;
        }
        Effect::SetCategory {
            path: asset.path.clone(),
            category: choice.category(),
        }
    }

    fn open_gallery_image(&mut self, index: usize, ctx: FocusContext<'_>) -> Effect {
        if self.focused_asset.is_none() || index >= self.gallery_images.len() {
            return Effect::None;
        }
        self.viewing_gallery_image = true;
        self.gallery_index = Some(index);
        self.media_changed(ctx.catalog);
        Effect::GalleryImageShown(index)
    }

    fn click_focused_image(&mut self, ctx: FocusContext<'_>) -> Effect {
        if !self.viewing_gallery_image {
            return Effect::None;
        }
        self.viewing_gallery_image = false;
        self.gallery_index = None;
        self.media_changed(ctx.catalog);
        Effect::ReturnedToAsset
    }

    /// Arrow-key navigation. Inside a gallery, plain arrows cycle through the
    /// images with wrap-around; otherwise the selection moves to the nearest
    /// visible sibling file and stops at either end of the list.
    fn navigate(
        &mut self,
        direction: Direction,
        across_assets: bool,
        ctx: FocusContext<'_>,
    ) -> Effect {
        if self.focused_asset.is_none() {
            return Effect::None;
        }

        if !across_assets && self.viewing_gallery_image && !self.gallery_images.is_empty() {
            let len = self.gallery_images.len();
            let current = self.gallery_index.unwrap_or(0).min(len - 1);
            let target = match direction {
                Direction::Next => (current + 1) % len,
                Direction::Previous => (current + len - 1) % len,
            };
            return self.open_gallery_image(target, ctx);
        }

        let Some(from) = self.selected_index else {
            return Effect::None;
        };
        match SiblingNavigator::new(ctx.records, ctx.filter).peek(from, direction) {
            Some(index) => self.focus_asset(index, ctx),
            None => Effect::None,
        }
    }

    /// Tears down all focus state. Returns [`Effect::None`] when already closed.
    pub fn close(&mut self) -> Effect {
        if self.focused_asset.is_none() && self.selected_index.is_none() {
            return Effect::None;
        }
        self.selected_index = None;
        self.focused_asset = None;
        self.viewing_gallery_image = false;
        self.gallery_images.clear();
        self.gallery_index = None;
        self.pending_gallery = None;
        self.press_origin = None;
        self.media_path = None;
        self.media_size = None;
        self.editor = MetadataEditorState::default();
        self.transform.reset();
        Effect::Closed
    }

    fn apply_gallery(
        &mut self,
        request: GalleryRequest,
        asset_path: &Path,
        result: Result<Vec<PathBuf>, CatalogError>,
        ctx: FocusContext<'_>,
    ) -> Effect {
        let current = self.pending_gallery.as_ref().is_some_and(|pending| {
            pending.request == request
                && pending.asset_path == asset_path
                && self
                    .focused_asset
                    .as_ref()
                    .is_some_and(|asset| asset.path == asset_path)
        });
        if !current {
            return Effect::StaleGalleryResponse(request);
        }
        self.pending_gallery = None;

        match result {
            Ok(images) => {
                let count = images.len();
                self.gallery_images = images;
                let auto_opened =
                    self.auto_open_gallery && count > 0 && !self.viewing_gallery_image;
                if auto_opened {
                    self.viewing_gallery_image = true;
                    self.gallery_index = Some(0);
                    self.media_changed(ctx.catalog);
                }
                Effect::GalleryLoaded { count, auto_opened }
            }
            Err(err) => Effect::GalleryFailed(err),
        }
    }

    fn handle_key(
        &mut self,
        key: &Key,
        modifiers: keyboard::Modifiers,
        ctx: FocusContext<'_>,
    ) -> Effect {
        let Some(asset) = self.focused_asset.as_ref() else {
            return Effect::None;
        };

        match key {
            Key::Named(Named::ArrowRight) => self.navigate(Direction::Next, modifiers.shift(), ctx),
            Key::Named(Named::ArrowLeft) => {
                self.navigate(Direction::Previous, modifiers.shift(), ctx)
            }
            Key::Named(Named::Escape) => self.close(),
            Key::Character(c) if c.eq_ignore_ascii_case("h") => Effect::SetHidden {
                path: asset.path.clone(),
                hidden: !asset.is_hidden,
            },
            Key::Character(c) => match c.parse::<i64>() {
                Ok(value) if (0..=i64::from(Rating::MAX)).contains(&value) => Effect::Rate {
                    path: asset.path.clone(),
                    rating: Rating::new(value),
                },
                _ => Effect::None,
            },
            _ => Effect::None,
        }
    }

    fn handle_canvas(&mut self, event: CanvasEvent, ctx: FocusContext<'_>) -> Effect {
        if self.focused_asset.is_none() {
            return Effect::None;
        }

        match event {
            CanvasEvent::Wheel {
                direction,
                cursor_offset,
            } => {
                if self.transform.zoom_at(direction, cursor_offset) {
                    Effect::Zoomed(direction)
                } else {
                    Effect::None
                }
            }
            CanvasEvent::Pressed(position) => {
                self.press_origin = Some(position);
                self.transform.begin_pan(position);
                Effect::None
            }
            CanvasEvent::Moved(position) => {
                self.transform.pan_to(position);
                Effect::None
            }
            CanvasEvent::Released(position) => {
                self.transform.end_pan();
                let clicked = self
                    .press_origin
                    .take()
                    .is_some_and(|origin| origin.distance(position) <= CLICK_SLOP);
                if clicked {
                    self.click_focused_image(ctx)
                } else {
                    Effect::None
                }
            }
            CanvasEvent::BackdropPressed => self.close(),
            CanvasEvent::CursorLeft => {
                self.transform.end_pan();
                self.press_origin = None;
                Effect::None
            }
        }
    }

    /// Re-binds focus after the snapshot was replaced. The focused asset is
    /// looked up by path; if it disappeared, focus closes. A changed gallery
    /// keyword or category restarts the gallery lookup.
    pub fn sync_with_snapshot(&mut self, ctx: FocusContext<'_>) -> Effect {
        let Some(previous) = self.focused_asset.as_ref() else {
            return Effect::None;
        };
        let Some(index) = ctx
            .records
            .iter()
            .position(|record| record.path == previous.path)
        else {
            return self.close();
        };

        let record = &ctx.records[index];
        let gallery_changed = record.custom_gallery_keyword != previous.custom_gallery_keyword
            || record.qualifies_for_gallery() != previous.qualifies_for_gallery();

        self.selected_index = Some(index);
        self.editor.rebase(record);
        self.focused_asset = Some(record.clone());
        if !gallery_changed {
            return Effect::None;
        }

        let fetch = self.restart_gallery();
        self.media_changed(ctx.catalog);
        Effect::GalleryReset { fetch }
    }

    /// Resolves the displayed media after a mode or asset change and resets
    /// the transform.
    fn media_changed(&mut self, catalog: &dyn AssetCatalog) {
        self.transform.reset();
        self.press_origin = None;

        let gallery_image = if self.viewing_gallery_image {
            self.gallery_index
                .and_then(|index| self.gallery_images.get(index))
                .cloned()
        } else {
            None
        };
        self.media_path = gallery_image.or_else(|| {
            self.focused_asset.as_ref().map(|asset| {
                asset
                    .display_image()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(catalog.thumbnail_url(&asset.path)))
            })
        });
        self.media_size = match self.media_path.as_deref() {
            Some(path) => self.previews.dimensions(path),
            None => None,
        };
    }
}
