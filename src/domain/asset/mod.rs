// SPDX-License-Identifier: MPL-2.0
//! Asset domain types.
//!
//! An asset is one entry of a directory listing: a model file grouped with its
//! sidecar previews and metadata, or a sub-directory.

pub mod filter;
pub mod kind;
pub mod naming;
pub mod record;

pub use filter::VisibilityFilter;
pub use kind::{mime_type_for, FileKind};
pub use naming::true_base_name;
pub use record::{AssetRecord, Category, Rating, Ratings, TagSet};
