// SPDX-License-Identifier: MPL-2.0
//! Natural size of the media shown in the focus viewer.
//!
//! Only the image header is read. Results, including failures, are kept in
//! an LRU cache so stepping back and forth through a gallery does not touch
//! the disk again.

use iced::Size;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default number of remembered entries.
pub const DEFAULT_CAPACITY: usize = 256;

/// Cached image dimensions keyed by path.
pub struct PreviewCache {
    cache: LruCache<PathBuf, Option<Size>>,
    hits: u64,
    misses: u64,
}

impl std::fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("len", &self.cache.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PreviewCache {
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the pixel size of the image at `path`, probing it on a miss.
    /// `None` when the file is missing or not a decodable image.
    #[allow(clippy::cast_precision_loss)]
    pub fn dimensions(&mut self, path: &Path) -> Option<Size> {
        if let Some(size) = self.cache.get(path) {
            self.hits += 1;
            return *size;
        }
        self.misses += 1;
        let size = image_rs::image_dimensions(path)
            .ok()
            .filter(|(width, height)| *width > 0 && *height > 0)
            .map(|(width, height)| Size::new(width as f32, height as f32));
        self.cache.put(path.to_path_buf(), size);
        size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Largest size with the aspect ratio of `media` that fits in `bounds`.
/// Unknown or degenerate media fills the bounds.
#[must_use]
pub fn contained_size(media: Option<Size>, bounds: Size) -> Size {
    match media {
        Some(media) if media.width > 0.0 && media.height > 0.0 => {
            let factor = (bounds.width / media.width).min(bounds.height / media.height);
            if factor.is_finite() && factor > 0.0 {
                Size::new(media.width * factor, media.height * factor)
            } else {
                bounds
            }
        }
        _ => bounds,
    }
}
