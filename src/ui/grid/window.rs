// SPDX-License-Identifier: MPL-2.0
//! Maps the scroll position to the slice of the asset list that must be
//! materialized.

use super::geometry::ViewportState;
use std::ops::Range;

/// Contiguous, half-open index range to render and the offset of its first row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub start_row: usize,
    pub end_row: usize,
    /// Distance from the top of the content to the first rendered row.
    pub vertical_offset: f32,
}

impl RenderWindow {
    /// Resolves the window for `viewport` over a list of `total_count` items.
    ///
    /// Starts `overscan` rows above the first visible row and ends `overscan`
    /// rows below the last one, clamped to the list. The result always covers
    /// `[scroll_offset, scroll_offset + container_height]`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn resolve(viewport: &ViewportState, total_count: usize) -> Self {
        let row_height = viewport.row_height();
        let columns = viewport.columns_visible.max(1);
        let scroll = viewport.scroll_offset.max(0.0);

        let first_row = (scroll / row_height).floor() as usize;
        let leading_row = (scroll / row_height).ceil() as usize;
        let total_rows = total_count.div_ceil(columns);

        let end_row = total_rows.min(
            leading_row
                .saturating_add(viewport.rows_visible)
                .saturating_add(viewport.overscan),
        );
        let start_row = first_row.saturating_sub(viewport.overscan).min(end_row);

        let end_index = end_row.saturating_mul(columns).min(total_count);
        let start_index = start_row.saturating_mul(columns).min(end_index);

        Self {
            start_index,
            end_index,
            start_row,
            end_row,
            vertical_offset: start_row as f32 * row_height,
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn viewport(columns: usize, rows: usize, row_height: f32, overscan: usize) -> ViewportState {
        ViewportState {
            scroll_offset: 0.0,
            container_width: columns as f32 * row_height,
            container_height: rows as f32 * row_height,
            item_cell_width: row_height,
            item_cell_height: row_height,
            columns_visible: columns,
            rows_visible: rows,
            overscan,
            used_fallback: false,
        }
    }

    #[test]
    fn large_list_mid_scroll() {
        let vp = viewport(5, 4, 100.0, 5).with_scroll(1000.0);
        let window = RenderWindow::resolve(&vp, 10_000);
        assert_eq!(window.start_row, 5);
        assert_eq!(window.start_index, 25);
        assert_eq!(window.end_row, 19);
        assert_eq!(window.end_index, 95);
        assert_abs_diff_eq!(window.vertical_offset, 500.0);
    }

    #[test]
    fn top_of_list_starts_at_zero() {
        let vp = viewport(3, 2, 50.0, 5);
        let window = RenderWindow::resolve(&vp, 100);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.end_index, 21);
        assert_abs_diff_eq!(window.vertical_offset, 0.0);
    }

    #[test]
    fn end_is_clamped_to_total() {
        let vp = viewport(4, 3, 100.0, 2).with_scroll(150.0);
        let window = RenderWindow::resolve(&vp, 10);
        assert_eq!(window.end_index, 10);
        assert_eq!(window.start_index, 0);
    }

    #[test]
    fn empty_list_gives_empty_window() {
        let vp = viewport(4, 3, 100.0, 2).with_scroll(500.0);
        let window = RenderWindow::resolve(&vp, 0);
        assert!(window.is_empty());
        assert_abs_diff_eq!(window.vertical_offset, 0.0);
    }

    #[test]
    fn scroll_past_end_stays_consistent() {
        let vp = viewport(2, 2, 100.0, 0).with_scroll(10_000.0);
        let window = RenderWindow::resolve(&vp, 6);
        assert!(window.start_index <= window.end_index);
        assert_eq!(window.end_index, 6);
        assert_eq!(window.start_row, window.end_row);
    }

    #[test]
    fn window_covers_visible_rows() {
        for columns in 1..6 {
            for overscan in [0, 1, 5] {
                for step in 0..200 {
                    let scroll = step as f32 * 37.5;
                    let vp = viewport(columns, 4, 90.0, overscan).with_scroll(scroll);
                    let total = 500;
                    let window = RenderWindow::resolve(&vp, total);

                    let top = window.start_row as f32 * vp.row_height();
                    let bottom = window.end_row as f32 * vp.row_height();
                    let content = vp.content_height(total);
                    let visible_bottom = (scroll + vp.container_height).min(content);
                    if scroll < content {
                        assert!(top <= scroll, "top {top} > scroll {scroll}");
                        assert!(bottom >= visible_bottom, "bottom {bottom} < {visible_bottom}");
                    }
                }
            }
        }
    }
}
