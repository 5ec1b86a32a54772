// SPDX-License-Identifier: MPL-2.0
//! Incremental grid renderer.
//!
//! Keeps the materialized cells of the current [`RenderWindow`] and rebuilds
//! them only when the window's index range or block offset changes, or a
//! rebuild is forced.
//! Deferred renders are coalesced: at most one is pending, and scheduling
//! another replaces it.

use super::window::RenderWindow;
use crate::domain::asset::{AssetRecord, VisibilityFilter};
use std::ops::Range;
use std::time::{Duration, Instant};

/// Offsets closer than this are the same block position.
const OFFSET_EPSILON: f32 = 0.01;

/// What occupies one grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// A real asset card.
    Asset,
    /// An inert slot for an entry that fails the visibility filter.
    Filtered,
    /// An inert slot for an index past the end of the snapshot.
    Missing,
}

/// One materialized grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub kind: CellKind,
}

impl GridCell {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.kind != CellKind::Asset
    }
}

/// Result of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Range and offset matched the last render and nothing was rebuilt.
    Skipped,
    Rebuilt {
        range: Range<usize>,
        forced: bool,
        placeholders: usize,
        elapsed: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRender {
    window: RenderWindow,
    force: bool,
}

/// Retained render state of the grid.
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    cells: Vec<GridCell>,
    vertical_offset: f32,
    last_rendered: Option<Range<usize>>,
    pending: Option<PendingRender>,
    rebuild_count: u64,
}

impl GridRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells of the last rebuild, in index order.
    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Offset applied to the rendered block as a whole.
    #[must_use]
    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    #[must_use]
    pub fn last_rendered(&self) -> Option<Range<usize>> {
        self.last_rendered.clone()
    }

    /// Number of rebuilds performed so far.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Defers a render to the next frame, replacing any pending one. A force
    /// flag on the replaced request carries over so a refresh is never lost.
    pub fn schedule(&mut self, window: RenderWindow, force: bool) {
        let force = force || self.pending.is_some_and(|pending| pending.force);
        self.pending = Some(PendingRender { window, force });
    }

    /// Runs the pending render. Returns `None` when nothing was scheduled.
    pub fn on_frame(
        &mut self,
        records: &[AssetRecord],
        filter: VisibilityFilter,
    ) -> Option<RenderOutcome> {
        let pending = self.pending.take()?;
        Some(self.render(pending.window, records, filter, pending.force))
    }

    /// Renders `window` now. Cancels any pending render since this one
    /// supersedes it.
    pub fn render_now(
        &mut self,
        window: RenderWindow,
        records: &[AssetRecord],
        filter: VisibilityFilter,
        force: bool,
    ) -> RenderOutcome {
        let force = force || self.pending.take().is_some_and(|pending| pending.force);
        self.render(window, records, filter, force)
    }

    fn render(
        &mut self,
        window: RenderWindow,
        records: &[AssetRecord],
        filter: VisibilityFilter,
        force: bool,
    ) -> RenderOutcome {
        let range = window.range();
        // A new row height moves the block even when the range is unchanged.
        let same_offset = (window.vertical_offset - self.vertical_offset).abs() < OFFSET_EPSILON;
        if !force && same_offset && self.last_rendered.as_ref() == Some(&range) {
            return RenderOutcome::Skipped;
        }

        let started = Instant::now();
        self.cells.clear();
        self.cells.extend(range.clone().map(|index| GridCell {
            index,
            kind: match records.get(index) {
                Some(record) if filter.admits(record) => CellKind::Asset,
                Some(_) => CellKind::Filtered,
                None => CellKind::Missing,
            },
        }));
        self.vertical_offset = window.vertical_offset;
        self.last_rendered = Some(range.clone());
        self.rebuild_count += 1;

        RenderOutcome::Rebuilt {
            range,
            forced: force,
            placeholders: self.cells.iter().filter(|cell| cell.is_placeholder()).count(),
            elapsed: started.elapsed(),
        }
    }
}
