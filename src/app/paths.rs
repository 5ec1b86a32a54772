// SPDX-License-Identifier: MPL-2.0
//! Where settings and asset metadata live on disk.
//!
//! `settings.toml` sits in the config directory and `metadata.json` in the
//! data directory. Each directory resolves, first match wins, from:
//!
//! 1. a path passed by the caller (tests, the app's own config override)
//! 2. `--config-dir` / `--data-dir` given on the command line
//! 3. `ASSET_LENS_CONFIG_DIR` / `ASSET_LENS_DATA_DIR`, when non-empty
//! 4. the platform directory from `dirs`, with `AssetLens` appended

use crate::infrastructure::metadata_store::METADATA_FILE;
use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "AssetLens";

pub const ENV_DATA_DIR: &str = "ASSET_LENS_DATA_DIR";
pub const ENV_CONFIG_DIR: &str = "ASSET_LENS_CONFIG_DIR";

#[derive(Debug, Default)]
struct CliOverrides {
    data: Option<PathBuf>,
    config: Option<PathBuf>,
}

static CLI_OVERRIDES: OnceLock<CliOverrides> = OnceLock::new();

/// Records `--data-dir` and `--config-dir`. Only the first call counts.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let _ = CLI_OVERRIDES.set(CliOverrides {
        data: data_dir.map(PathBuf::from),
        config: config_dir.map(PathBuf::from),
    });
}

#[derive(Debug, Clone, Copy)]
enum AppDir {
    Data,
    Config,
}

impl AppDir {
    fn env_var(self) -> &'static str {
        match self {
            AppDir::Data => ENV_DATA_DIR,
            AppDir::Config => ENV_CONFIG_DIR,
        }
    }

    fn cli_override(self) -> Option<PathBuf> {
        let overrides = CLI_OVERRIDES.get()?;
        match self {
            AppDir::Data => overrides.data.clone(),
            AppDir::Config => overrides.config.clone(),
        }
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            AppDir::Data => dirs::data_dir(),
            AppDir::Config => dirs::config_dir(),
        }
    }

    fn resolve(self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| self.cli_override())
            .or_else(|| {
                std::env::var_os(self.env_var())
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| self.platform_base().map(|base| base.join(APP_NAME)))
    }
}

/// Config directory, or `None` when the platform has none.
pub fn config_dir_with_override(explicit: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Config.resolve(explicit)
}

/// The metadata store file inside the data directory.
pub fn metadata_file_with_override(explicit: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Data
        .resolve(explicit)
        .map(|dir| dir.join(METADATA_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch the process environment.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn explicit_dir_wins_over_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/env/data");

        let file = metadata_file_with_override(Some(PathBuf::from("/explicit")));
        assert_eq!(file, Some(PathBuf::from("/explicit").join(METADATA_FILE)));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn environment_selects_config_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/env/config");

        assert_eq!(
            config_dir_with_override(None),
            Some(PathBuf::from("/env/config"))
        );

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_environment_falls_back_to_platform_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "");

        if let Some(file) = metadata_file_with_override(None) {
            assert!(file.is_absolute());
            assert!(file.parent().is_some_and(|dir| dir.ends_with(APP_NAME)));
        }

        std::env::remove_var(ENV_DATA_DIR);
    }
}
