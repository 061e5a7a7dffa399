//! Configuration for the Voxscape renderer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Missing fields fall back to defaults, so older config files
//! keep loading as new settings are added.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_rgba_hex};
pub use config::{Config, DebugConfig, OutputConfig, RenderConfig, SceneConfig};
pub use error::ConfigError;
