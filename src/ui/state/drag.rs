// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning the focused media.

use iced::{Point, Vector};

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Position where the drag started
    pub start_position: Option<Point>,

    /// Translation of the media when the drag started
    pub start_translate: Option<Vector>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point, translate: Vector) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.start_translate = Some(translate);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.start_translate = None;
    }

    /// Calculates the translation for the current cursor position. The media
    /// follows the cursor: moving right by 10px moves the content right by 10px.
    #[must_use]
    pub fn calculate_translate(&self, current_position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }

        let start_pos = self.start_position?;
        let start_translate = self.start_translate?;

        Some(start_translate + (current_position - start_pos))
    }
}
