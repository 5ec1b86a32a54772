// SPDX-License-Identifier: MPL-2.0
//! Domain layer: pure value types with no framework dependencies.
//!
//! # Modules
//!
//! - [`asset`]: catalog entries ([`AssetRecord`](asset::AssetRecord),
//!   [`Category`](asset::Category), [`Rating`](asset::Rating)) and the
//!   visibility rules shared by the grid and sibling navigation
//! - [`diagnostics`]: [`BufferCapacity`](diagnostics::BufferCapacity)
//! - [`ui`]: clamped UI values ([`GridZoomPercent`](ui::GridZoomPercent),
//!   [`MaxViewScale`](ui::MaxViewScale), [`OverscanRows`](ui::OverscanRows))

pub mod asset;
pub mod diagnostics;
pub mod ui;
