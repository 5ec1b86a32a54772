// SPDX-License-Identifier: MPL-2.0
//! `asset_lens` is a local browser for model files (checkpoints, loras) and
//! their preview images, built with the Iced GUI framework.
//!
//! The core is a virtualized grid that only materializes the rows around the
//! scroll position, plus a focus viewer that shows either the asset's own
//! preview or one of the example images discovered for it.

pub mod app;
pub mod application;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
