// SPDX-License-Identifier: MPL-2.0
//! Zoom and pan transform of the focused media.
//!
//! The media is drawn at `origin + translate + scale * p` for a point `p` of
//! the unscaled media. Wheel zoom keeps the point under the cursor fixed;
//! dragging pans, but only once the media is magnified.

use super::drag::DragState;
use crate::domain::ui::MaxViewScale;
use iced::{Point, Vector};

/// Factor applied per wheel step.
pub const ZOOM_RATIO: f32 = 1.1;

const MIN_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Scale and translation of the focused media plus the active drag.
#[derive(Debug, Clone)]
pub struct TransformState {
    scale: f32,
    translate: Vector,
    max_scale: MaxViewScale,
    drag: DragState,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(MaxViewScale::default())
    }
}

impl TransformState {
    #[must_use]
    pub fn new(max_scale: MaxViewScale) -> Self {
        Self {
            scale: MIN_SCALE,
            translate: Vector::ZERO,
            max_scale,
            drag: DragState::default(),
        }
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn translate(&self) -> Vector {
        self.translate
    }

    #[must_use]
    pub fn max_scale(&self) -> MaxViewScale {
        self.max_scale
    }

    /// Panning is only possible while magnified.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.scale > MIN_SCALE
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    /// Back to identity. Also ends any drag.
    pub fn reset(&mut self) {
        self.scale = MIN_SCALE;
        self.translate = Vector::ZERO;
        self.drag.stop();
    }

    /// Applies one wheel step anchored at the cursor.
    ///
    /// `cursor_offset` is the cursor position relative to the media's current
    /// on-screen top-left corner. Returns `false` when the scale is already at
    /// the bound in that direction, in which case nothing changes.
    pub fn zoom_at(&mut self, direction: ZoomDirection, cursor_offset: Vector) -> bool {
        let factor = match direction {
            ZoomDirection::In => ZOOM_RATIO,
            ZoomDirection::Out => 1.0 / ZOOM_RATIO,
        };
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(MIN_SCALE, self.max_scale.value());
        if (new_scale - old_scale).abs() <= f32::EPSILON {
            return false;
        }

        let ratio = new_scale / old_scale - 1.0;
        self.translate = self.translate - cursor_offset * ratio;
        self.scale = new_scale;
        true
    }

    /// Starts a pan at `position`. Ignored at identity scale.
    pub fn begin_pan(&mut self, position: Point) -> bool {
        if !self.can_pan() {
            return false;
        }
        self.drag.start(position, self.translate);
        true
    }

    /// Moves the media with the pointer during a pan.
    pub fn pan_to(&mut self, position: Point) -> bool {
        if !self.can_pan() {
            return false;
        }
        match self.drag.calculate_translate(position) {
            Some(translate) => {
                self.translate = translate;
                true
            }
            None => false,
        }
    }

    pub fn end_pan(&mut self) {
        self.drag.stop();
    }

    /// Maps a point of the unscaled media to screen space relative to `origin`.
    #[must_use]
    pub fn to_screen(&self, origin: Point, media_point: Point) -> Point {
        origin + self.translate + Vector::new(media_point.x, media_point.y) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn zoom_is_clamped_between_one_and_max() {
        let mut transform = TransformState::new(MaxViewScale::new(1.2));
        assert!(!transform.zoom_at(ZoomDirection::Out, Vector::ZERO));
        assert!(transform.zoom_at(ZoomDirection::In, Vector::ZERO));
        assert_abs_diff_eq!(transform.scale(), 1.1, epsilon = 1e-6);
        assert!(transform.zoom_at(ZoomDirection::In, Vector::ZERO));
        assert_abs_diff_eq!(transform.scale(), 1.2, epsilon = 1e-6);
        assert!(!transform.zoom_at(ZoomDirection::In, Vector::ZERO));
    }

    #[test]
    fn no_op_zoom_keeps_translation() {
        let mut transform = TransformState::default();
        let before = transform.translate();
        transform.zoom_at(ZoomDirection::Out, Vector::new(50.0, 50.0));
        assert_eq!(transform.translate(), before);
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let origin = Point::new(10.0, 20.0);
        let mut transform = TransformState::default();
        transform.zoom_at(ZoomDirection::In, Vector::new(30.0, 40.0));

        for cursor in [Point::new(70.0, 90.0), Point::new(150.0, 25.0)] {
            let top_left = transform.to_screen(origin, Point::ORIGIN);
            let offset = cursor - top_left;
            let media_point = Point::new(offset.x / transform.scale(), offset.y / transform.scale());

            assert!(transform.zoom_at(ZoomDirection::In, offset));

            let after = transform.to_screen(origin, media_point);
            assert_abs_diff_eq!(after.x, cursor.x, epsilon = 1e-3);
            assert_abs_diff_eq!(after.y, cursor.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn translation_follows_formula() {
        let mut transform = TransformState::default();
        transform.zoom_at(ZoomDirection::In, Vector::new(100.0, 50.0));
        // translate = 0 - offset * (1.1 / 1.0 - 1)
        assert_abs_diff_eq!(transform.translate().x, -10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(transform.translate().y, -5.0, epsilon = 1e-4);
    }

    #[test]
    fn pan_requires_magnification() {
        let mut transform = TransformState::default();
        assert!(!transform.begin_pan(Point::new(0.0, 0.0)));
        assert!(!transform.pan_to(Point::new(10.0, 10.0)));
        assert_eq!(transform.translate(), Vector::ZERO);

        transform.zoom_at(ZoomDirection::In, Vector::ZERO);
        assert!(transform.begin_pan(Point::new(0.0, 0.0)));
        assert!(transform.pan_to(Point::new(12.0, -4.0)));
        assert_eq!(transform.translate(), Vector::new(12.0, -4.0));
        transform.end_pan();
        assert!(!transform.is_dragging());
        assert!(!transform.pan_to(Point::new(50.0, 50.0)));
    }

    #[test]
    fn reset_restores_identity() {
        let mut transform = TransformState::default();
        transform.zoom_at(ZoomDirection::In, Vector::new(5.0, 5.0));
        transform.begin_pan(Point::ORIGIN);
        transform.reset();
        assert_abs_diff_eq!(transform.scale(), 1.0);
        assert_eq!(transform.translate(), Vector::ZERO);
        assert!(!transform.is_dragging());
    }
}
