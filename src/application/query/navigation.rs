// SPDX-License-Identifier: MPL-2.0
//! Sibling navigation through the visible asset list.
//!
//! The focus viewer steps between assets with the arrow keys. Only files that
//! pass the active [`VisibilityFilter`] are eligible stops; directories are
//! always skipped. Unlike gallery navigation, stepping past either end of the
//! list does not wrap.

use crate::domain::asset::{AssetRecord, VisibilityFilter};

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Read-only view over an asset snapshot that finds eligible neighbours.
#[derive(Debug, Clone, Copy)]
pub struct SiblingNavigator<'a> {
    records: &'a [AssetRecord],
    filter: VisibilityFilter,
}

impl<'a> SiblingNavigator<'a> {
    #[must_use]
    pub fn new(records: &'a [AssetRecord], filter: VisibilityFilter) -> Self {
        Self { records, filter }
    }

    /// Index of the nearest eligible asset after `from`, if any.
    #[must_use]
    pub fn peek_next(&self, from: usize) -> Option<usize> {
        self.peek(from, Direction::Next)
    }

    /// Index of the nearest eligible asset before `from`, if any.
    #[must_use]
    pub fn peek_previous(&self, from: usize) -> Option<usize> {
        self.peek(from, Direction::Previous)
    }

    /// Scans from `from` (exclusive) in `direction`.
    ///
    /// `from` may lie past the end of the snapshot after a refresh shrank the
    /// list; a backward scan then starts at the last record.
    #[must_use]
    pub fn peek(&self, from: usize, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Next => self
                .records
                .iter()
                .enumerate()
                .skip(from.saturating_add(1))
                .find(|(_, record)| self.filter.is_navigable(record))
                .map(|(index, _)| index),
            Direction::Previous => {
                let end = from.min(self.records.len());
                self.records[..end]
                    .iter()
                    .rposition(|record| self.filter.is_navigable(record))
            }
        }
    }

    /// Number of eligible stops in the snapshot.
    #[must_use]
    pub fn eligible_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filter.is_navigable(record))
            .count()
    }
}
