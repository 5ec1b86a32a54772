// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Framework-light state machines the components own, kept apart from the
//! widgets that render them so they can be tested without a window.

pub mod drag;
pub mod transform;

pub use drag::DragState;
pub use transform::{TransformState, ZoomDirection, ZOOM_RATIO};
