//! Where the renderer keeps its config and logs.

use std::path::{Path, PathBuf};

use voxscape_config::ConfigError;

const APP_NAME: &str = "voxscape";

/// Per-user directories for configuration and log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log written in debug builds.
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Resolve directories, preferring an explicit config directory over the
    /// OS default (XDG on Linux, Known Folders on Windows, Library on macOS).
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, ConfigError> {
        match config_override {
            Some(dir) => Ok(Self::rooted_at(dir.to_path_buf())),
            None => {
                let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
                Ok(Self::rooted_at(base.join(APP_NAME)))
            }
        }
    }

    fn rooted_at(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let dirs = AppDirs::resolve(Some(Path::new("/tmp/vs"))).unwrap();
        assert_eq!(dirs.config_dir, PathBuf::from("/tmp/vs"));
        assert_eq!(dirs.log_dir, PathBuf::from("/tmp/vs/logs"));
    }

    #[test]
    fn test_default_location_ends_with_app_name() {
        // Headless CI may not expose a config dir; only check when it does.
        if let Ok(dirs) = AppDirs::resolve(None) {
            assert!(dirs.config_dir.ends_with(APP_NAME));
            assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        }
    }
}
