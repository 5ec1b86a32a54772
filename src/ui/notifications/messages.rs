// SPDX-License-Identifier: MPL-2.0
//! Message table for notification keys.

use crate::error::CatalogError;

fn template(key: &str) -> Option<&'static str> {
    let text = match key {
        "notification-catalog-not-found" => "Directory not found: {detail}",
        "notification-catalog-permission-denied" => "Permission denied: {detail}",
        "notification-catalog-invalid-path" => "Not a directory: {detail}",
        "notification-catalog-io" => "Could not read directory: {detail}",
        "notification-gallery-failed" => "Gallery lookup failed: {detail}",
        "notification-parent-unavailable" => "Already at the top directory",
        "notification-no-directory" => "Open a directory first",
        "notification-config-load-error" => "Settings could not be read, defaults are in use",
        "notification-config-save-error" => "Settings could not be saved: {detail}",
        "notification-state-save-error" => "Session state could not be saved: {detail}",
        "notification-metadata-load-error" => "Metadata could not be read, edits stay in memory: {detail}",
        "notification-metadata-save-error" => "Could not save metadata: {detail}",
        "notification-rating-saved" => "{name} rated {rating}",
        "notification-asset-hidden" => "{name} hidden",
        "notification-asset-shown" => "{name} visible again",
        "notification-metadata-saved" => "Saved details of {name}",
        "notification-category-set" => "{name} filed as {category}",
        "notification-category-cleared" => "{name} categorized automatically",
        "notification-diagnostics-exported" => "Diagnostics saved to {path}",
        "notification-diagnostics-export-error" => "Diagnostics export failed: {detail}",
        _ => return None,
    };
    Some(text)
}

/// Resolves `key` and substitutes `{name}` placeholders from `args`.
/// Unknown keys resolve to themselves.
#[must_use]
pub fn resolve(key: &str, args: &[(String, String)]) -> String {
    let mut text = template(key).unwrap_or(key).to_string();
    for (name, value) in args {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

/// The `detail` argument for a catalog failure.
#[must_use]
pub fn catalog_detail(error: &CatalogError) -> String {
    match error {
        CatalogError::DirectoryNotFound(detail)
        | CatalogError::PermissionDenied(detail)
        | CatalogError::InvalidPath(detail)
        | CatalogError::Io(detail) => detail.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_key_with_arguments() {
        let args = vec![("detail".to_string(), "models/loras".to_string())];
        assert_eq!(
            resolve("notification-catalog-not-found", &args),
            "Directory not found: models/loras"
        );
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(resolve("notification-unknown", &[]), "notification-unknown");
    }

    #[test]
    fn every_catalog_error_key_has_text() {
        let errors = [
            CatalogError::DirectoryNotFound("a".into()),
            CatalogError::PermissionDenied("a".into()),
            CatalogError::InvalidPath("a".into()),
            CatalogError::Io("a".into()),
        ];
        for error in &errors {
            assert!(template(error.message_key()).is_some(), "{error:?}");
            assert_eq!(catalog_detail(error), "a");
        }
    }

    #[test]
    fn missing_argument_leaves_placeholder() {
        assert_eq!(resolve("notification-asset-hidden", &[]), "{name} hidden");
    }
}
