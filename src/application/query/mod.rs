// SPDX-License-Identifier: MPL-2.0
//! Query services over the current asset snapshot.
//!
//! - [`navigation`]: stepping between eligible siblings ([`SiblingNavigator`])

pub mod navigation;

pub use navigation::{Direction, SiblingNavigator};
