//! The output raster and the column compositor that writes into it.
//!
//! Storage is row-major with row 0 at the top. The compositor works in
//! logical rows, where row 0 is the bottom of the screen.

use crate::error::RenderError;
use crate::maps::{Pixel, unpack_rgba};

/// A growable pixel buffer that keeps its allocation between frames.
///
/// The backing storage only grows: a smaller request reuses the existing
/// allocation, so [`capacity`](Self::capacity) can exceed the current
/// `width * height`.
#[derive(Clone, Debug, Default)]
pub struct Framebuffer {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Create an unallocated framebuffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical width of the last frame.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height of the last frame.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels the backing storage can hold.
    pub fn capacity(&self) -> usize {
        self.pixels.len()
    }

    /// Whether any storage has been allocated yet.
    pub fn is_allocated(&self) -> bool {
        !self.pixels.is_empty()
    }

    /// Pixels of the current logical frame.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels[..self.area()]
    }

    /// Borrow the current logical frame.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            pixels: self.pixels(),
            width: self.width,
            height: self.height,
        }
    }

    fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Make room for `area` pixels, replacing the allocation only if it is too
    /// small. Returns `true` if a new allocation was made.
    ///
    /// On failure the existing storage is left untouched.
    pub(crate) fn reserve(&mut self, area: usize) -> Result<bool, RenderError> {
        if area <= self.pixels.len() {
            return Ok(false);
        }

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(area)
            .map_err(|source| RenderError::AllocationFailure {
                pixels: area,
                source,
            })?;
        pixels.resize(area, 0);
        self.pixels = pixels;
        Ok(true)
    }

    /// Set the logical size and fill it with `background`.
    ///
    /// Callers must have reserved at least `width * height` pixels.
    pub(crate) fn begin_frame(&mut self, width: u32, height: u32, background: Pixel) {
        debug_assert!(width as usize * height as usize <= self.pixels.len());
        self.width = width;
        self.height = height;
        let area = self.area();
        self.pixels[..area].fill(background);
    }

    /// Fill logical rows `y_begin..y_end` of column `x` with `color`.
    ///
    /// `y_end` is clamped to the frame height and an empty range is a no-op.
    /// No other column is touched.
    pub fn draw_column(&mut self, x: u32, y_begin: u32, y_end: u32, color: Pixel) {
        debug_assert!(x < self.width, "column {x} outside width {}", self.width);
        if x >= self.width {
            return;
        }
        let y_end = y_end.min(self.height);
        if y_begin >= y_end {
            return;
        }

        let width = self.width as usize;
        let height = self.height as usize;
        let x = x as usize;
        for row in y_begin as usize..y_end as usize {
            let storage_row = height - row - 1;
            self.pixels[storage_row * width + x] = color;
        }
    }
}

/// A read-only view of one rendered frame.
///
/// Borrowed from the context that rendered it, so it cannot outlive the
/// context or survive the next render call.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pixels: &'a [Pixel],
    width: u32,
    height: u32,
}

impl<'a> FrameView<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major, top row first.
    pub fn pixels(&self) -> &'a [Pixel] {
        self.pixels
    }

    /// Pixel at column `x` of storage row `y` (row 0 is the top of the screen).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// One storage row (row 0 is the top of the screen).
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &'a [Pixel] {
        assert!(y < self.height, "row {y} outside height {}", self.height);
        let width = self.width as usize;
        let start = y as usize * width;
        &self.pixels[start..start + width]
    }

    /// The frame as raw bytes in native `u32` order. On little-endian hosts
    /// this is tightly packed RGBA8.
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.pixels)
    }

    /// Copy the frame into RGBA8 bytes regardless of host endianness.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| unpack_rgba(p)).collect()
    }

    /// Copy the frame into an owned image.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(unpack_rgba(self.pixel(x, y)))
        })
    }
}
