// SPDX-License-Identifier: MPL-2.0
//! File kind detection by extension.

/// Extension tables (lowercase, without the leading dot).
pub mod extensions {
    /// Images the focus viewer can display and the gallery search collects.
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

    /// Video containers.
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "mkv", "webm"];

    /// Model weight formats.
    pub const MODEL_EXTENSIONS: &[&str] = &["safetensors", "ckpt", "pt", "pth", "gguf"];
}

/// Coarse classification of a file by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Model,
    Json,
    Other,
}

impl FileKind {
    /// Classifies an extension, with or without its leading dot, case-insensitively.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        let ext = ext.as_str();
        if extensions::IMAGE_EXTENSIONS.contains(&ext) {
            FileKind::Image
        } else if extensions::VIDEO_EXTENSIONS.contains(&ext) {
            FileKind::Video
        } else if extensions::MODEL_EXTENSIONS.contains(&ext) {
            FileKind::Model
        } else if ext == "json" {
            FileKind::Json
        } else {
            FileKind::Other
        }
    }

    /// Whether the focus viewer and grid can render this kind directly.
    #[must_use]
    pub fn is_renderable(self) -> bool {
        matches!(self, FileKind::Image | FileKind::Video)
    }
}

/// Returns a MIME type for an extension. Unknown extensions map to
/// `application/octet-stream`.
#[must_use]
pub fn mime_type_for(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
