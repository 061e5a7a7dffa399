//! Voxel Space terrain rendering: a heightmap and colormap pair drawn into a
//! perspective raster by column-major ray casting.
//!
//! A [`TerrainContext`] owns both maps and the output [`Framebuffer`]. Each
//! [`TerrainContext::render`] call marches depth slices from near to far with
//! a slowly growing step, samples the maps with toroidal wrap-around, and uses
//! a per-column skyline to occlude distant terrain.

mod context;
mod error;
mod framebuffer;
mod maps;
mod params;
mod renderer;
mod skyline;
mod wrap;

pub use context::TerrainContext;
pub use error::RenderError;
pub use framebuffer::{FrameView, Framebuffer};
pub use maps::{
    ColorMap, HeightMap, MapKind, MapSource, Pixel, TerrainMaps, pack_rgba, unpack_rgba,
};
pub use params::{
    DEFAULT_BASELINE, DEFAULT_DISTANCE, DEFAULT_DZ_INCREMENT, DEFAULT_FOV_SCALE, DEFAULT_HORIZON,
    DEFAULT_MAX_COLUMNS, DEFAULT_SCALE, MAX_DISTANCE, RenderParams,
};
pub use skyline::Skyline;
pub use wrap::wrap_index;
