// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! Bounded values (grid zoom, overscan, view scale) take their defaults from
//! the domain newtypes so the clamp ranges and defaults never drift apart.
//!
//! # Categories
//!
//! - **Grid**: zoom, gap, overscan, listing filters
//! - **Focus**: gallery auto-open and magnification ceiling
//! - **Gallery**: how many images are collected
//! - **Categorization**: lora/checkpoint size thresholds

use crate::domain::ui::newtypes::{grid_zoom_bounds, overscan_bounds, view_scale_bounds};

// ==========================================================================
// Grid Defaults
// ==========================================================================

/// Default grid zoom on the displayed slider scale.
pub const DEFAULT_GRID_ZOOM_PERCENT: f32 = grid_zoom_bounds::DEFAULT_PERCENT;

/// Default extra rows rendered above and below the viewport.
pub const DEFAULT_OVERSCAN_ROWS: usize = overscan_bounds::DEFAULT;

/// Default gap between cards, in pixels.
pub const DEFAULT_GRID_GAP: f32 = 10.0;

/// Largest accepted gap, in pixels.
pub const MAX_GRID_GAP: f32 = 64.0;

/// Rating category used for sorting and for the rating keys.
pub const DEFAULT_RATING_CATEGORY: &str = "overall";

// ==========================================================================
// Focus Defaults
// ==========================================================================

pub const DEFAULT_AUTO_OPEN_GALLERY: bool = false;

/// Default ceiling of the focus viewer's zoom.
pub const DEFAULT_MAX_VIEW_SCALE: f32 = view_scale_bounds::DEFAULT;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Newest images kept per gallery.
pub const DEFAULT_GALLERY_MAX_IMAGES: usize = 100;

/// Upper bound for `max_images`.
pub const MAX_GALLERY_MAX_IMAGES: usize = 1000;

// ==========================================================================
// Categorization Defaults
// ==========================================================================

/// Model files below this size are loras (1 GiB).
pub const DEFAULT_LORA_MAX_BYTES: u64 = 1024 * 1024 * 1024;

/// Model files at or above this size are checkpoints (3 GiB).
pub const DEFAULT_CHECKPOINT_MIN_BYTES: u64 = 3 * 1024 * 1024 * 1024;

// ==========================================================================
// Notification tick
// ==========================================================================

/// Interval between notification auto-dismiss checks, in milliseconds.
pub const NOTIFICATION_TICK_MS: u64 = 250;

// Compile-time sanity checks
const _: () = {
    assert!(DEFAULT_GRID_GAP >= 0.0);
    assert!(DEFAULT_GRID_GAP <= MAX_GRID_GAP);
    assert!(DEFAULT_GALLERY_MAX_IMAGES <= MAX_GALLERY_MAX_IMAGES);
    assert!(DEFAULT_LORA_MAX_BYTES <= DEFAULT_CHECKPOINT_MIN_BYTES);
};
