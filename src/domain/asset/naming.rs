// SPDX-License-Identifier: MPL-2.0
//! Sidecar-aware file naming.
//!
//! A model `foo.safetensors` travels with files such as `foo.preview.png` and
//! `foo.cm-info.json`. All of them share the *true base name* `foo`, which is
//! what the catalog groups on.

/// Preview image suffixes, longest first.
pub const PREVIEW_SUFFIXES: &[&str] = &[
    ".preview.jpeg",
    ".preview.webp",
    ".preview.webm",
    ".preview.jpg",
    ".preview.png",
    ".preview.gif",
];

/// Metadata sidecar suffixes, longest first.
pub const METADATA_SUFFIXES: &[&str] = &[".metadata.json", ".cm-info.json", ".info.json", ".meta.json"];

/// Primary content suffixes in selection priority: when a group holds several
/// candidates, the one matching the earliest entry wins.
pub const PRIMARY_PRIORITY: &[&str] = &[
    ".safetensors",
    ".ckpt",
    ".webm",
    ".jpeg",
    ".webp",
    ".gguf",
    ".json",
    ".pth",
    ".jpg",
    ".png",
    ".gif",
    ".pt",
];

/// Suffix used for the canonical path of a group whose primary file is gone.
pub const FALLBACK_PRIMARY_SUFFIX: &str = ".safetensors";

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    if name.len() < suffix.len() {
        return false;
    }
    let start = name.len() - suffix.len();
    name.is_char_boundary(start) && name[start..].eq_ignore_ascii_case(suffix)
}

fn strip_known_suffix(name: &str) -> Option<&str> {
    PREVIEW_SUFFIXES
        .iter()
        .chain(METADATA_SUFFIXES)
        .chain(PRIMARY_PRIORITY)
        .filter(|suffix| ends_with_ignore_case(name, suffix))
        .max_by_key(|suffix| suffix.len())
        .map(|suffix| &name[..name.len() - suffix.len()])
}

/// Returns `name` without its last extension; leading dots do not start one.
fn strip_last_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => &name[..idx],
        _ => name,
    }
}

/// Computes the grouping name of a file by repeatedly stripping known
/// suffixes. Names with no known suffix fall back to dropping their last
/// extension.
#[must_use]
pub fn true_base_name(file_name: &str) -> String {
    if file_name.is_empty() {
        return String::new();
    }

    let mut current = file_name;
    while let Some(stripped) = strip_known_suffix(current) {
        current = stripped;
    }
    let current = current.strip_suffix('.').unwrap_or(current);

    if current.is_empty() || current == file_name {
        return strip_last_extension(file_name).to_string();
    }
    current.to_string()
}

/// Whether the file name marks a preview image.
#[must_use]
pub fn is_preview_name(file_name: &str) -> bool {
    PREVIEW_SUFFIXES
        .iter()
        .any(|suffix| ends_with_ignore_case(file_name, suffix))
}

/// Whether the file name marks a metadata sidecar.
#[must_use]
pub fn is_metadata_name(file_name: &str) -> bool {
    METADATA_SUFFIXES
        .iter()
        .any(|suffix| ends_with_ignore_case(file_name, suffix))
}

/// Priority rank of a primary content candidate (lower wins), or `None` when
/// the file is a preview, a metadata sidecar or has no primary extension.
#[must_use]
pub fn primary_rank(file_name: &str) -> Option<usize> {
    if is_preview_name(file_name) || is_metadata_name(file_name) {
        return None;
    }
    PRIMARY_PRIORITY
        .iter()
        .position(|suffix| ends_with_ignore_case(file_name, suffix))
}
