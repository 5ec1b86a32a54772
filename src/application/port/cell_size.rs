// SPDX-License-Identifier: MPL-2.0
//! Grid cell measurement port.
//!
//! Geometry never measures widgets directly. The view layer implements
//! [`CellSizeProvider`] with the same metrics it draws cards with, and tests
//! inject fixed sizes.

/// Natural size of one grid card at a given scale, gap excluded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl CellSize {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether the measurement can be used for layout math.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Measures one grid card for a zoom scale factor.
pub trait CellSizeProvider {
    fn measure(&self, scale: f32) -> CellSize;
}

/// Provider returning the same size for every scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCellSize(pub CellSize);

impl CellSizeProvider for FixedCellSize {
    fn measure(&self, _scale: f32) -> CellSize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_nan_sizes_are_unusable() {
        assert!(!CellSize::new(0.0, 10.0).is_usable());
        assert!(!CellSize::new(10.0, f32::NAN).is_usable());
        assert!(CellSize::new(1.0, 1.0).is_usable());
    }

    #[test]
    fn fixed_provider_ignores_scale() {
        let provider = FixedCellSize(CellSize::new(90.0, 100.0));
        assert_eq!(provider.measure(0.1), provider.measure(10.0));
    }
}
