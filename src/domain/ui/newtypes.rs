// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! Type-safe wrappers for the grid zoom slider, the focus viewer's maximum
//! magnification and the grid overscan, so values read from settings are
//! always within range.

// =============================================================================
// Grid Zoom Bounds
// =============================================================================

/// Grid zoom slider bounds (10% to 500% on the displayed scale).
pub mod grid_zoom_bounds {
    /// Minimum displayed percentage.
    pub const MIN_PERCENT: f32 = 10.0;
    /// Maximum displayed percentage.
    pub const MAX_PERCENT: f32 = 500.0;
    /// Default displayed percentage.
    pub const DEFAULT_PERCENT: f32 = 100.0;
    /// Percentage at which the two linear segments of the mapping meet.
    pub const KNEE_PERCENT: f32 = 100.0;
    /// Smallest scale factor ever produced.
    pub const MIN_SCALE: f32 = 0.1;
}

/// Maps a displayed grid zoom percentage to a cell scale factor.
///
/// The mapping is piecewise linear: 10%..=100% spans 1.0x..=5.0x and
/// 100%..=500% spans 5.0x..=10.0x, so the slider is fine-grained near the
/// default and still reaches large cells at the top of its range. The result
/// never drops below [`grid_zoom_bounds::MIN_SCALE`].
#[must_use]
pub fn zoom_to_scale(displayed: f32) -> f32 {
    let scale = if displayed <= grid_zoom_bounds::KNEE_PERCENT {
        1.0 + 2.0 * (displayed - grid_zoom_bounds::MIN_PERCENT) / 45.0
    } else {
        5.0 + (displayed - grid_zoom_bounds::KNEE_PERCENT) / 80.0
    };
    scale.max(grid_zoom_bounds::MIN_SCALE)
}

// =============================================================================
// GridZoomPercent
// =============================================================================

/// Displayed grid zoom percentage, guaranteed to be within 10%–500%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridZoomPercent(f32);

impl GridZoomPercent {
    /// Creates a new zoom percentage, clamping the value to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if !percent.is_finite() {
            return Self::default();
        }
        Self(percent.clamp(
            grid_zoom_bounds::MIN_PERCENT,
            grid_zoom_bounds::MAX_PERCENT,
        ))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the cell scale factor for this percentage.
    #[must_use]
    pub fn to_scale(self) -> f32 {
        zoom_to_scale(self.0)
    }
}

impl Default for GridZoomPercent {
    fn default() -> Self {
        Self(grid_zoom_bounds::DEFAULT_PERCENT)
    }
}

// =============================================================================
// MaxViewScale
// =============================================================================

/// Focus viewer magnification bounds.
pub mod view_scale_bounds {
    /// The identity scale; zooming out never goes below it.
    pub const MIN: f32 = 1.0;
    /// Largest configurable ceiling.
    pub const MAX: f32 = 20.0;
    /// Default ceiling.
    pub const DEFAULT: f32 = 5.0;
}

/// Upper bound for the focus viewer's zoom, within 1x–20x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxViewScale(f32);

impl MaxViewScale {
    #[must_use]
    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self(value.clamp(view_scale_bounds::MIN, view_scale_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for MaxViewScale {
    fn default() -> Self {
        Self(view_scale_bounds::DEFAULT)
    }
}

// =============================================================================
// OverscanRows
// =============================================================================

/// Overscan bounds (rows rendered beyond each edge of the viewport).
pub mod overscan_bounds {
    pub const MIN: usize = 0;
    pub const MAX: usize = 50;
    pub const DEFAULT: usize = 5;
}

/// Extra rows materialized above and below the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverscanRows(usize);

impl OverscanRows {
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self(rows.clamp(overscan_bounds::MIN, overscan_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for OverscanRows {
    fn default() -> Self {
        Self(overscan_bounds::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[test]
    fn zoom_mapping_fixed_points_are_exact() {
        assert_eq!(zoom_to_scale(10.0), 1.0);
        assert_eq!(zoom_to_scale(100.0), 5.0);
        assert_eq!(zoom_to_scale(500.0), 10.0);
    }

    #[test]
    fn zoom_mapping_segments() {
        assert_abs_diff_eq!(zoom_to_scale(55.0), 3.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(zoom_to_scale(180.0), 6.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn zoom_mapping_is_monotonic() {
        let mut previous = zoom_to_scale(10.0);
        let mut displayed = 10.0;
        while displayed <= 500.0 {
            let scale = zoom_to_scale(displayed);
            assert!(scale >= previous, "scale decreased at {displayed}");
            previous = scale;
            displayed += 0.5;
        }
    }

    #[test]
    fn zoom_mapping_is_floored() {
        assert_eq!(zoom_to_scale(-100.0), grid_zoom_bounds::MIN_SCALE);
    }

    #[test]
    fn grid_zoom_percent_clamps() {
        assert_eq!(GridZoomPercent::new(1.0).value(), 10.0);
        assert_eq!(GridZoomPercent::new(900.0).value(), 500.0);
        assert_eq!(GridZoomPercent::new(f32::NAN), GridZoomPercent::default());
        assert_eq!(GridZoomPercent::default().to_scale(), 5.0);
    }

    #[test]
    fn max_view_scale_clamps() {
        assert_eq!(MaxViewScale::new(0.2).value(), 1.0);
        assert_eq!(MaxViewScale::new(100.0).value(), 20.0);
        assert_eq!(MaxViewScale::default().value(), 5.0);
    }

    #[test]
    fn overscan_clamps() {
        assert_eq!(OverscanRows::new(500).value(), overscan_bounds::MAX);
        assert_eq!(OverscanRows::default().value(), 5);
    }
}
