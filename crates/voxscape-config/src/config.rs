//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain maps and camera placement.
    pub scene: SceneConfig,
    /// Ray-casting tunables.
    pub render: RenderConfig,
    /// Frame size, view direction and where frames are written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Colour map image (PNG or JPEG).
    pub color_map: PathBuf,
    /// Height map image; decoded to 8-bit greyscale.
    pub height_map: PathBuf,
    /// Camera start position, in height-map texels.
    pub start_x: f32,
    pub start_y: f32,
    /// Sky colour as `(r, g, b, a)`.
    pub background: [u8; 4],
}

/// Ray-casting configuration.
///
/// Field meanings match the renderer's parameters one-to-one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical exaggeration of terrain height.
    pub scale: f32,
    /// Far clip distance in map units.
    pub distance: f32,
    /// Horizon row as a fraction of frame height.
    pub horizon: f32,
    /// Field-of-view multiplier on the aspect ratio.
    pub fov_scale: f32,
    /// Widest frame that may be requested.
    pub max_columns: u32,
    /// Camera reference elevation.
    pub baseline: f32,
    /// Depth step growth per slice.
    pub dz_increment: f32,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// View direction of the first frame, in radians.
    pub heading: f32,
    /// Number of frames to render.
    pub frames: u32,
    /// Heading added per frame, in radians.
    pub heading_step: f32,
    /// PNG output path. Multi-frame runs number the file stem.
    pub path: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            color_map: PathBuf::from("maps/color.png"),
            height_map: PathBuf::from("maps/height.png"),
            start_x: 0.0,
            start_y: 0.0,
            background: [144, 176, 224, 255],
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 0.65,
            distance: 512.0,
            horizon: 0.4,
            fov_scale: 0.8,
            max_columns: 2048,
            baseline: 50.0,
            dz_increment: 0.005,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            heading: 0.0,
            frames: 1,
            heading_step: 0.05,
            path: PathBuf::from("frame.png"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Check settings that would make a run meaningless before any map is loaded.
    ///
    /// Render tunables are checked by the renderer itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.width == 0 || self.output.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "output.width/height",
                reason: format!(
                    "frame must be non-empty, got {}x{}",
                    self.output.width, self.output.height
                ),
            });
        }
        if self.output.frames == 0 {
            return Err(ConfigError::InvalidValue {
                field: "output.frames",
                reason: "at least one frame is required".to_string(),
            });
        }
        if !self.output.heading.is_finite() || !self.output.heading_step.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "output.heading",
                reason: "heading and heading_step must be finite".to_string(),
            });
        }
        if !self.scene.start_x.is_finite() || !self.scene.start_y.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "scene.start_x/start_y",
                reason: "camera start must be finite".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 800"));
        assert!(ron_str.contains("max_columns: 2048"));
        assert!(ron_str.contains("color_map: \"maps/color.png\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.scene.background = [1, 2, 3, 4];
        config.render.dz_increment = 0.01;
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(scene: (start_x: 12.5), output: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene.start_x, 12.5);
        assert_eq!(config.scene.height_map, SceneConfig::default().height_map);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.width = 1920;
        config.output.frames = 36;
        config.scene.color_map = PathBuf::from("/tmp/c1w.png");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.render.scale = 1.2;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.render.scale), Some(1.2));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_validate_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_frame_and_zero_frames() {
        let mut config = Config::default();
        config.output.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = Config::default();
        config.output.frames = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.frames"));
    }

    #[test]
    fn test_validate_rejects_non_finite_camera() {
        let mut config = Config::default();
        config.scene.start_y = f32::NAN;
        assert!(config.validate().is_err());
    }
}
