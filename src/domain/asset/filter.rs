// SPDX-License-Identifier: MPL-2.0
//! Visibility rules shared by the grid renderer and sibling navigation.

use super::record::AssetRecord;

/// The active "show hidden files" / "hide folders" toggles.
///
/// The grid never removes entries that fail this filter: it renders an inert
/// placeholder in their slot so that the number of cells per row, and with it
/// every scroll computation, stays independent of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityFilter {
    pub show_hidden: bool,
    pub hide_folders: bool,
}

impl VisibilityFilter {
    #[must_use]
    pub fn new(show_hidden: bool, hide_folders: bool) -> Self {
        Self {
            show_hidden,
            hide_folders,
        }
    }

    /// Whether the record should be drawn as a real cell.
    #[must_use]
    pub fn admits(&self, record: &AssetRecord) -> bool {
        if record.is_directory {
            return !self.hide_folders;
        }
        self.show_hidden || !record.is_hidden
    }

    /// Whether sibling navigation may stop on the record: a visible file.
    #[must_use]
    pub fn is_navigable(&self, record: &AssetRecord) -> bool {
        !record.is_directory && self.admits(record)
    }
}
