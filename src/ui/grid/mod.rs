// SPDX-License-Identifier: MPL-2.0
//! Virtualized asset grid.
//!
//! Only the rows around the viewport are materialized:
//!
//! - [`geometry`] measures cells and derives rows and columns
//! - [`window`] maps the scroll position to an index range
//! - [`renderer`] rebuilds the cells when that range changes
//! - [`card`] and [`view`] turn the cells into widgets
//!
//! Scrolling schedules a render for the next frame; the application drives
//! [`GridState::on_frame`] from a frame subscription while one is pending.

pub mod card;
pub mod geometry;
pub mod renderer;
pub mod view;
pub mod window;

pub use card::CardMetrics;
pub use geometry::{GeometryCalculator, ViewportState, FALLBACK_CELL};
pub use renderer::{CellKind, GridCell, GridRenderer, RenderOutcome};
pub use view::view;
pub use window::RenderWindow;

use crate::application::port::CellSize;
use crate::domain::asset::{AssetRecord, VisibilityFilter};
use crate::domain::ui::GridZoomPercent;
use iced::widget::operation;
use iced::widget::scrollable::{RelativeOffset, Viewport};
use iced::widget::Id;
use iced::{Size, Task};

/// Identifier used for the grid scrollable widget.
pub const SCROLLABLE_ID: &str = "asset-grid-scrollable";

/// Container size changes smaller than this are treated as jitter.
const RESIZE_EPSILON: f32 = 0.5;

/// Width reserved for the vertical scrollbar.
pub const SCROLLBAR_GUTTER: f32 = 16.0;

/// Space available to cards inside a scrollable of `bounds`.
#[must_use]
pub fn content_size(bounds: Size) -> Size {
    Size::new((bounds.width - SCROLLBAR_GUTTER).max(0.0), bounds.height)
}

#[derive(Debug, Clone)]
pub enum Message {
    Scrolled(Viewport),
    ZoomChanged(f32),
    CellPressed(usize),
}

/// Side effects the application should perform after a grid message.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Select(usize),
    /// The zoom slider moved; the new value should be persisted.
    ZoomChanged(GridZoomPercent),
}

/// Layout, scroll position and render state of the grid.
#[derive(Debug, Clone)]
pub struct GridState {
    calculator: GeometryCalculator,
    metrics: CardMetrics,
    zoom: GridZoomPercent,
    container: Size,
    viewport: ViewportState,
    renderer: GridRenderer,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(GeometryCalculator::default(), GridZoomPercent::default())
    }
}

impl GridState {
    #[must_use]
    pub fn new(calculator: GeometryCalculator, zoom: GridZoomPercent) -> Self {
        let metrics = CardMetrics::default();
        let container = Size::ZERO;
        Self {
            viewport: calculator.compute(container, zoom, &metrics),
            calculator,
            metrics,
            zoom,
            container,
            renderer: GridRenderer::new(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    #[must_use]
    pub fn zoom(&self) -> GridZoomPercent {
        self.zoom
    }

    #[must_use]
    pub fn gap(&self) -> f32 {
        self.calculator.gap
    }

    /// Card size without the gap.
    #[must_use]
    pub fn card_size(&self) -> CellSize {
        CellSize::new(
            self.viewport.item_cell_width - self.calculator.gap,
            self.viewport.item_cell_height - self.calculator.gap,
        )
    }

    /// Window for the current scroll position.
    #[must_use]
    pub fn window(&self, total: usize) -> RenderWindow {
        RenderWindow::resolve(&self.viewport, total)
    }

    fn recompute(&mut self) {
        let scroll = self.viewport.scroll_offset;
        self.viewport = self
            .calculator
            .compute(self.container, self.zoom, &self.metrics)
            .with_scroll(scroll);
    }

    /// Updates the container size. Returns `true` when the layout changed.
    pub fn resize(&mut self, container: Size) -> bool {
        if (container.width - self.container.width).abs() < RESIZE_EPSILON
            && (container.height - self.container.height).abs() < RESIZE_EPSILON
        {
            return false;
        }
        self.container = container;
        let before = self.viewport;
        self.recompute();
        before.columns_visible != self.viewport.columns_visible
            || before.rows_visible != self.viewport.rows_visible
    }

    pub fn set_zoom(&mut self, zoom: GridZoomPercent) {
        self.zoom = zoom;
        self.recompute();
    }

    pub fn set_scroll(&mut self, offset: f32) {
        self.viewport = self.viewport.with_scroll(offset);
    }

    /// Defers a render of the current window to the next frame.
    pub fn schedule_render(&mut self, total: usize, force: bool) {
        let window = self.window(total);
        self.renderer.schedule(window, force);
    }

    /// Renders the current window immediately.
    pub fn render_now(
        &mut self,
        records: &[AssetRecord],
        filter: VisibilityFilter,
        force: bool,
    ) -> RenderOutcome {
        let window = self.window(records.len());
        self.renderer.render_now(window, records, filter, force)
    }

    /// Runs a pending deferred render.
    pub fn on_frame(
        &mut self,
        records: &[AssetRecord],
        filter: VisibilityFilter,
    ) -> Option<RenderOutcome> {
        self.renderer.on_frame(records, filter)
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.renderer.has_pending()
    }

    /// Scrolls the least amount that brings `index` into view.
    pub fn reveal(&mut self, index: usize, total: usize) -> Task<Message> {
        let target = self.viewport.reveal_offset(index);
        if (target - self.viewport.scroll_offset).abs() < f32::EPSILON {
            return Task::none();
        }
        self.set_scroll(target);
        self.schedule_render(total, false);
        self.snap_task(total)
    }

    /// Jumps back to the top, used when a new directory is listed.
    pub fn scroll_to_top(&mut self) -> Task<Message> {
        self.set_scroll(0.0);
        operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset { x: 0.0, y: 0.0 })
    }

    fn snap_task(&self, total: usize) -> Task<Message> {
        let scrollable = (self.viewport.content_height(total) - self.viewport.container_height).max(1.0);
        let relative_y = (self.viewport.scroll_offset / scrollable).clamp(0.0, 1.0);
        operation::snap_to(
            Id::new(SCROLLABLE_ID),
            RelativeOffset {
                x: 0.0,
                y: relative_y,
            },
        )
    }

    /// Handles a grid message. `total` is the length of the current snapshot.
    pub fn handle_message(&mut self, message: Message, total: usize) -> Effect {
        match message {
            Message::Scrolled(viewport) => {
                let relayout = self.resize(content_size(viewport.bounds().size()));
                self.set_scroll(viewport.absolute_offset().y);
                self.schedule_render(total, relayout);
                Effect::None
            }
            Message::ZoomChanged(percent) => {
                let zoom = GridZoomPercent::new(percent);
                if zoom == self.zoom {
                    return Effect::None;
                }
                self.set_zoom(zoom);
                // row height changed; the block offset must be recomputed
                self.schedule_render(total, true);
                Effect::ZoomChanged(zoom)
            }
            Message::CellPressed(index) => Effect::Select(index),
        }
    }
}
