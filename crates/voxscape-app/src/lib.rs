//! Command-line host for the Voxscape renderer.
//!
//! Turns a [`Config`] into a [`TerrainContext`], renders one or more frames
//! while sweeping the heading, and writes each frame as a PNG.

pub mod error;
pub mod output;
pub mod platform;

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;
use voxscape_config::{Config, RenderConfig};
use voxscape_render::{MapSource, RenderParams, TerrainContext, pack_rgba};

pub use error::AppError;

/// Renderer parameters for a render config section.
pub fn render_params(config: &RenderConfig) -> RenderParams {
    RenderParams {
        scale: config.scale,
        distance: config.distance,
        horizon: config.horizon,
        fov_scale: config.fov_scale,
        max_columns: config.max_columns,
        baseline: config.baseline,
        dz_increment: config.dz_increment,
    }
}

/// Load both maps named by the config and build a context.
pub fn build_context(config: &Config) -> Result<TerrainContext, AppError> {
    let scene = &config.scene;
    let [r, g, b, a] = scene.background;
    let context = TerrainContext::load(
        MapSource::Path(&scene.color_map),
        MapSource::Path(&scene.height_map),
        scene.start_x,
        scene.start_y,
        pack_rgba(r, g, b, a),
    )?
    .with_params(render_params(&config.render))?;
    Ok(context)
}

/// Render every configured frame and return the files written, in order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, AppError> {
    config.validate()?;
    let mut context = build_context(config)?;
    let output = &config.output;

    let mut written = Vec::with_capacity(output.frames as usize);
    for index in 0..output.frames {
        let heading = output.heading + index as f32 * output.heading_step;
        let path = output::frame_path(&output.path, index, output.frames);

        let started = Instant::now();
        let frame = context.render(output.width, output.height, heading)?;
        let elapsed = started.elapsed();
        output::write_png(&frame, &path)?;

        info!(
            frame = index,
            heading,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            path = %path.display(),
            "Rendered frame"
        );
        written.push(path);
    }

    Ok(written)
}
