//! Terrain context: owns the maps, the camera and the output framebuffer.

use glam::Vec2;

use crate::error::RenderError;
use crate::framebuffer::{FrameView, Framebuffer};
use crate::maps::{ColorMap, HeightMap, MapSource, Pixel, TerrainMaps};
use crate::params::RenderParams;
use crate::renderer;

/// Everything needed to render frames of one terrain.
///
/// The context exclusively owns both maps and the framebuffer. Frames are
/// returned as a [`FrameView`] borrowed from the context, so a frame cannot be
/// held across the next [`render`](Self::render) call or past drop.
///
/// Independent contexts can render on different threads; each render call
/// owns its own skyline scratch.
#[derive(Clone, Debug)]
pub struct TerrainContext {
    maps: TerrainMaps,
    framebuffer: Framebuffer,
    origin: Vec2,
    background: Pixel,
    params: RenderParams,
}

impl TerrainContext {
    /// Create a context from decoded maps, with default render parameters.
    ///
    /// The camera origin is in height-map texel units, as is the far
    /// `distance` of the render parameters.
    pub fn new(
        color: ColorMap,
        height: HeightMap,
        start_x: f32,
        start_y: f32,
        background: Pixel,
    ) -> Self {
        tracing::info!(
            color_size = ?(color.width(), color.height()),
            height_size = ?(height.width(), height.height()),
            start_x,
            start_y,
            "Created terrain context"
        );
        Self {
            maps: TerrainMaps::new(color, height),
            framebuffer: Framebuffer::new(),
            origin: Vec2::new(start_x, start_y),
            background,
            params: RenderParams::default(),
        }
    }

    /// Decode both maps and create a context.
    ///
    /// Fails without building anything if either map cannot be decoded or
    /// has invalid dimensions.
    pub fn load(
        color: MapSource<'_>,
        height: MapSource<'_>,
        start_x: f32,
        start_y: f32,
        background: Pixel,
    ) -> Result<Self, RenderError> {
        let color = ColorMap::load(color)?;
        let height = HeightMap::load(height)?;
        Ok(Self::new(color, height, start_x, start_y, background))
    }

    /// Replace the render parameters after validating them.
    pub fn with_params(mut self, params: RenderParams) -> Result<Self, RenderError> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Move the camera for subsequent frames.
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Vec2::new(x, y);
    }

    pub fn background(&self) -> Pixel {
        self.background
    }

    pub fn set_background(&mut self, background: Pixel) {
        self.background = background;
    }

    pub fn color_map(&self) -> &ColorMap {
        self.maps.color()
    }

    pub fn height_map(&self) -> &HeightMap {
        self.maps.height()
    }

    /// The output buffer as left by the last successful render.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Elevation at a point in height-map units, wrapping at the edges.
    pub fn sample_height(&self, x: f32, y: f32) -> u8 {
        self.maps.sample_height(x, y)
    }

    /// Terrain colour at a point in height-map units, wrapping at the edges.
    pub fn sample_color(&self, x: f32, y: f32) -> Pixel {
        self.maps.sample_color(x, y)
    }

    /// Render a `width x height` frame looking along `heading` (radians,
    /// counter-clockwise from +x).
    ///
    /// The framebuffer is grown only when the new frame has more pixels than
    /// it can hold. On error nothing is modified.
    pub fn render(
        &mut self,
        width: u32,
        height: u32,
        heading: f32,
    ) -> Result<FrameView<'_>, RenderError> {
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "Rejected empty viewport");
            return Err(RenderError::EmptyViewport { width, height });
        }
        let max = self.params.max_columns;
        if width > max {
            tracing::warn!(width, max, "Rejected render wider than the column limit");
            return Err(RenderError::WidthExceedsCapacity { width, max });
        }
        let area = (width as usize)
            .checked_mul(height as usize)
            .ok_or(RenderError::ViewportOverflow { width, height })?;

        if self.framebuffer.reserve(area)? {
            tracing::debug!(width, height, capacity = area, "Reallocated framebuffer");
        }
        self.framebuffer.begin_frame(width, height, self.background);

        let slices = renderer::render_frame(
            &self.maps,
            self.origin,
            &self.params,
            heading,
            &mut self.framebuffer,
        );
        tracing::trace!(width, height, heading, slices, "Rendered frame");

        Ok(self.framebuffer.view())
    }
}
