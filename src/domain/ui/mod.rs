// SPDX-License-Identifier: MPL-2.0
//! UI domain types.
//!
//! Value objects for the grid and focus viewer, independent of any
//! presentation framework.

pub mod newtypes;

pub use newtypes::{zoom_to_scale, GridZoomPercent, MaxViewScale, OverscanRows};
