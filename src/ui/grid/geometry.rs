// SPDX-License-Identifier: MPL-2.0
//! Viewport geometry: cell size under the current zoom and how many cells
//! fit in the container.

use crate::application::port::{CellSize, CellSizeProvider};
use crate::domain::ui::{GridZoomPercent, OverscanRows};
use iced::Size;

/// Cell size used when measurement yields nothing usable.
pub const FALLBACK_CELL: CellSize = CellSize {
    width: 200.0,
    height: 240.0,
};

/// Layout of the grid viewport. Cell dimensions include the gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_offset: f32,
    pub container_width: f32,
    pub container_height: f32,
    pub item_cell_width: f32,
    pub item_cell_height: f32,
    /// Always at least 1.
    pub columns_visible: usize,
    pub rows_visible: usize,
    pub overscan: usize,
    /// Set when [`FALLBACK_CELL`] replaced the measured size.
    pub used_fallback: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        GeometryCalculator::default().compute_with_cell(Size::ZERO, FALLBACK_CELL, false)
    }
}

impl ViewportState {
    /// Height of one grid row, gap included.
    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.item_cell_height
    }

    /// Same layout at another scroll position. Negative offsets clamp to 0.
    #[must_use]
    pub fn with_scroll(mut self, scroll_offset: f32) -> Self {
        self.scroll_offset = if scroll_offset.is_finite() {
            scroll_offset.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Number of rows needed for `total` items.
    #[must_use]
    pub fn total_rows(&self, total: usize) -> usize {
        total.div_ceil(self.columns_visible)
    }

    /// Full scrollable height for `total` items.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn content_height(&self, total: usize) -> f32 {
        self.total_rows(total) as f32 * self.row_height()
    }

    /// Scroll offset that brings `index` fully into view with the least
    /// movement. Returns the current offset when the row is already visible.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reveal_offset(&self, index: usize) -> f32 {
        let row = index / self.columns_visible;
        let top = row as f32 * self.row_height();
        let bottom = top + self.row_height();
        if top < self.scroll_offset {
            top
        } else if bottom > self.scroll_offset + self.container_height {
            (bottom - self.container_height).max(0.0)
        } else {
            self.scroll_offset
        }
    }
}

/// Derives [`ViewportState`] from container size, zoom and a cell measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryCalculator {
    pub gap: f32,
    pub overscan: OverscanRows,
}

impl Default for GeometryCalculator {
    fn default() -> Self {
        Self {
            gap: 10.0,
            overscan: OverscanRows::default(),
        }
    }
}

impl GeometryCalculator {
    #[must_use]
    pub fn new(gap: f32, overscan: OverscanRows) -> Self {
        Self {
            gap: if gap.is_finite() { gap.max(0.0) } else { 0.0 },
            overscan,
        }
    }

    /// Measures a cell through `provider` at the scale of `zoom` and lays the
    /// grid out in `container`. Does not touch the scroll offset (left at 0).
    #[must_use]
    pub fn compute(
        &self,
        container: Size,
        zoom: GridZoomPercent,
        provider: &impl CellSizeProvider,
    ) -> ViewportState {
        let measured = provider.measure(zoom.to_scale());
        if measured.is_usable() {
            self.compute_with_cell(container, measured, false)
        } else {
            self.compute_with_cell(container, FALLBACK_CELL, true)
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn compute_with_cell(&self, container: Size, cell: CellSize, used_fallback: bool) -> ViewportState {
        let width = sanitize(container.width);
        let height = sanitize(container.height);
        let item_cell_width = cell.width + self.gap;
        let item_cell_height = cell.height + self.gap;

        let columns_visible = ((width / item_cell_width).floor() as usize).max(1);
        let rows_visible = (height / item_cell_height).ceil() as usize;

        ViewportState {
            scroll_offset: 0.0,
            container_width: width,
            container_height: height,
            item_cell_width,
            item_cell_height,
            columns_visible,
            rows_visible,
            overscan: self.overscan.value(),
            used_fallback,
        }
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
