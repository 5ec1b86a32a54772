// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.

/// Event buffer capacity bounds.
pub mod buffer_capacity_bounds {
    /// Smallest buffer worth keeping.
    pub const MIN: usize = 50;
    /// Upper bound on retained events.
    pub const MAX: usize = 5000;
    /// Capacity used when nothing is configured.
    pub const DEFAULT: usize = 500;
}

/// Number of diagnostic events kept in memory, clamped to
/// [`buffer_capacity_bounds::MIN`]..=[`buffer_capacity_bounds::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}
