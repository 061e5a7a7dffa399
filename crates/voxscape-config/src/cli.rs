//! Command-line argument parsing for the Voxscape renderer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Voxscape command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "voxscape", about = "Voxel Space terrain renderer")]
pub struct CliArgs {
    /// Colour map image.
    #[arg(long)]
    pub color_map: Option<PathBuf>,

    /// Height map image.
    #[arg(long)]
    pub height_map: Option<PathBuf>,

    /// Camera start x, in height-map texels.
    #[arg(long, allow_negative_numbers = true)]
    pub start_x: Option<f32>,

    /// Camera start y, in height-map texels.
    #[arg(long, allow_negative_numbers = true)]
    pub start_y: Option<f32>,

    /// Sky colour as RRGGBB or RRGGBBAA hex, with optional leading `#`.
    #[arg(long, value_parser = parse_rgba_hex)]
    pub background: Option<[u8; 4]>,

    /// Frame width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Frame height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// View direction of the first frame, in radians.
    #[arg(long, allow_negative_numbers = true)]
    pub heading: Option<f32>,

    /// Number of frames to render.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Heading change per frame, in radians.
    #[arg(long, allow_negative_numbers = true)]
    pub heading_step: Option<f32>,

    /// PNG output path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `RRGGBB` or `RRGGBBAA` (optionally `#`-prefixed) into RGBA bytes.
///
/// Six-digit colours are fully opaque.
pub fn parse_rgba_hex(s: &str) -> Result<[u8; 4], String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected RRGGBB or RRGGBBAA, got `{s}`"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| format!("invalid hex digits in `{s}`"))
    };
    let alpha = if hex.len() == 8 { channel(3)? } else { 255 };
    Ok([channel(0)?, channel(1)?, channel(2)?, alpha])
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref path) = args.color_map {
            self.scene.color_map = path.clone();
        }
        if let Some(ref path) = args.height_map {
            self.scene.height_map = path.clone();
        }
        if let Some(x) = args.start_x {
            self.scene.start_x = x;
        }
        if let Some(y) = args.start_y {
            self.scene.start_y = y;
        }
        if let Some(bg) = args.background {
            self.scene.background = bg;
        }
        if let Some(w) = args.width {
            self.output.width = w;
        }
        if let Some(h) = args.height {
            self.output.height = h;
        }
        if let Some(heading) = args.heading {
            self.output.heading = heading;
        }
        if let Some(frames) = args.frames {
            self.output.frames = frames;
        }
        if let Some(step) = args.heading_step {
            self.output.heading_step = step;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
