// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(CatalogError),
    Metadata(String),
}

/// Failures reported by the asset catalog (directory listing and gallery discovery).
/// Carries enough context to pick a user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The listed or searched directory does not exist.
    DirectoryNotFound(String),

    /// The directory exists but cannot be read.
    PermissionDenied(String),

    /// The path is not usable for the requested operation
    /// (e.g. listing a regular file).
    InvalidPath(String),

    /// Any other I/O failure.
    Io(String),
}

impl CatalogError {
    /// Returns the notification message key for this error type.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            CatalogError::DirectoryNotFound(_) => "notification-catalog-not-found",
            CatalogError::PermissionDenied(_) => "notification-catalog-permission-denied",
            CatalogError::InvalidPath(_) => "notification-catalog-invalid-path",
            CatalogError::Io(_) => "notification-catalog-io",
        }
    }

    /// Categorizes a raw I/O error raised while touching `path`.
    #[must_use]
    pub fn from_io(err: &std::io::Error, path: &std::path::Path) -> Self {
        let shown = path.display().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => CatalogError::DirectoryNotFound(shown),
            std::io::ErrorKind::PermissionDenied => CatalogError::PermissionDenied(shown),
            std::io::ErrorKind::NotADirectory | std::io::ErrorKind::InvalidInput => {
                CatalogError::InvalidPath(shown)
            }
            _ => CatalogError::Io(format!("{shown}: {err}")),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DirectoryNotFound(path) => write!(f, "Directory not found: {}", path),
            CatalogError::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            CatalogError::InvalidPath(path) => write!(f, "Invalid path: {}", path),
            CatalogError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::Metadata(e) => write!(f, "Metadata Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Error::Catalog(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Metadata(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
