// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Components
//!
//! - [`grid`] - Virtualized asset grid (geometry, windowing, incremental rendering)
//! - [`focus`] - Focus viewer with gallery navigation and zoom/pan
//! - [`toolbar`] - Directory actions, search, ordering and filters
//! - [`notifications`] - Toast notification system for user feedback
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Reusable state machines (zoom/pan transform, drag)
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod focus;
pub mod grid;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod theming;
pub mod toolbar;
