//! Colour and height maps: decoding, validation, and wrapped sampling.
//!
//! Both maps are immutable once built. Their dimensions are checked to be
//! non-zero powers of two up front, because [`wrap_index`] only produces the
//! correct toroidal mapping under that assumption.

use std::fmt;
use std::path::Path;

use crate::error::RenderError;
use crate::wrap::wrap_index;

/// A packed pixel whose little-endian bytes are `R, G, B, A`.
pub type Pixel = u32;

/// Pack four channels into a [`Pixel`].
#[inline]
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> Pixel {
    u32::from_le_bytes([r, g, b, a])
}

/// Split a [`Pixel`] back into `[r, g, b, a]`.
#[inline]
pub const fn unpack_rgba(pixel: Pixel) -> [u8; 4] {
    pixel.to_le_bytes()
}

/// Identifies which of the two terrain maps an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    Color,
    Height,
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Height => f.write_str("height"),
        }
    }
}

/// Where an encoded map comes from.
#[derive(Clone, Copy, Debug)]
pub enum MapSource<'a> {
    /// An image file on disk.
    Path(&'a Path),
    /// An encoded image already in memory (PNG or JPEG).
    Memory(&'a [u8]),
}

impl<'a> From<&'a Path> for MapSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a [u8]> for MapSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Memory(bytes)
    }
}

impl MapSource<'_> {
    fn decode(self, kind: MapKind) -> Result<image::DynamicImage, RenderError> {
        let decoded = match self {
            Self::Path(path) => image::open(path),
            Self::Memory(bytes) => image::load_from_memory(bytes),
        };
        decoded.map_err(|source| RenderError::MapLoad { kind, source })
    }
}

fn validate_dimensions(kind: MapKind, width: u32, height: u32) -> Result<(), RenderError> {
    if width.is_power_of_two() && height.is_power_of_two() {
        Ok(())
    } else {
        Err(RenderError::NotPowerOfTwo {
            kind,
            width,
            height,
        })
    }
}

fn validate_len(kind: MapKind, width: u32, height: u32, actual: usize) -> Result<(), RenderError> {
    let expected = width as usize * height as usize;
    if expected == actual {
        Ok(())
    } else {
        Err(RenderError::SampleCountMismatch {
            kind,
            expected,
            actual,
        })
    }
}

// ---------------------------------------------------------------------------
// ColorMap
// ---------------------------------------------------------------------------

/// Row-major RGBA terrain colours.
#[derive(Clone, Debug)]
pub struct ColorMap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl ColorMap {
    /// Build a colour map from already-decoded pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, RenderError> {
        validate_dimensions(MapKind::Color, width, height)?;
        validate_len(MapKind::Color, width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a colour map from an RGBA image.
    pub fn from_image(img: &image::RgbaImage) -> Result<Self, RenderError> {
        let (width, height) = img.dimensions();
        validate_dimensions(MapKind::Color, width, height)?;
        let pixels = img
            .pixels()
            .map(|p| pack_rgba(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode a colour map, converting whatever the source holds to RGBA8.
    pub fn load(source: MapSource<'_>) -> Result<Self, RenderError> {
        let img = source.decode(MapKind::Color)?.to_rgba8();
        Self::from_image(&img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Sample with wrap-around on both axes, in this map's own texel units.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> Pixel {
        let ix = wrap_index(x, self.width - 1);
        let iy = wrap_index(y, self.height - 1);
        self.pixels[(iy * self.width + ix) as usize]
    }
}

// ---------------------------------------------------------------------------
// HeightMap
// ---------------------------------------------------------------------------

/// Row-major 8-bit elevation samples.
#[derive(Clone, Debug)]
pub struct HeightMap {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl HeightMap {
    /// Build a height map from already-decoded single-channel samples.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, RenderError> {
        validate_dimensions(MapKind::Height, width, height)?;
        validate_len(MapKind::Height, width, height, samples.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a height map from a greyscale image.
    pub fn from_image(img: &image::GrayImage) -> Result<Self, RenderError> {
        let (width, height) = img.dimensions();
        validate_dimensions(MapKind::Height, width, height)?;
        Ok(Self {
            width,
            height,
            samples: img.as_raw().clone(),
        })
    }

    /// Decode a height map, reducing the source to 8-bit luma.
    pub fn load(source: MapSource<'_>) -> Result<Self, RenderError> {
        let img = source.decode(MapKind::Height)?.to_luma8();
        Self::from_image(&img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Sample with wrap-around on both axes.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> u8 {
        let ix = wrap_index(x, self.width - 1);
        let iy = wrap_index(y, self.height - 1);
        self.samples[(iy * self.width + ix) as usize]
    }
}

// ---------------------------------------------------------------------------
// TerrainMaps
// ---------------------------------------------------------------------------

/// The colour/height pair, addressed in height-map units.
///
/// The colour map may have a different resolution; colour lookups are scaled
/// per axis so both maps tile the same torus.
#[derive(Clone, Debug)]
pub struct TerrainMaps {
    color: ColorMap,
    height: HeightMap,
    color_scale: (f32, f32),
}

impl TerrainMaps {
    pub fn new(color: ColorMap, height: HeightMap) -> Self {
        let color_scale = (
            color.width as f32 / height.width as f32,
            color.height as f32 / height.height as f32,
        );
        Self {
            color,
            height,
            color_scale,
        }
    }

    pub fn color(&self) -> &ColorMap {
        &self.color
    }

    pub fn height(&self) -> &HeightMap {
        &self.height
    }

    #[inline]
    pub fn sample_height(&self, x: f32, y: f32) -> u8 {
        self.height.sample(x, y)
    }

    #[inline]
    pub fn sample_color(&self, x: f32, y: f32) -> Pixel {
        self.color
            .sample(x * self.color_scale.0, y * self.color_scale.1)
    }
}
