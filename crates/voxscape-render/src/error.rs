//! Error types for map loading and frame rendering.

use std::collections::TryReserveError;

use crate::maps::MapKind;

/// Errors returned while building a terrain context or rendering a frame.
///
/// Every variant is terminal for the call that produced it. A failed render
/// leaves the framebuffer exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The image codec could not decode a map source.
    #[error("failed to decode {kind} map: {source}")]
    MapLoad {
        /// Which map failed.
        kind: MapKind,
        /// Underlying decode or I/O error.
        #[source]
        source: image::ImageError,
    },

    /// A map dimension is zero or not a power of two.
    #[error("{kind} map is {width}x{height}, both dimensions must be non-zero powers of two")]
    NotPowerOfTwo {
        kind: MapKind,
        width: u32,
        height: u32,
    },

    /// A raw sample buffer does not match the declared dimensions.
    #[error("{kind} map expects {expected} samples, got {actual}")]
    SampleCountMismatch {
        kind: MapKind,
        expected: usize,
        actual: usize,
    },

    /// The requested width is above the configured column limit.
    #[error("width {width} exceeds the maximum of {max} columns")]
    WidthExceedsCapacity { width: u32, max: u32 },

    /// Width or height is zero.
    #[error("viewport must be non-zero, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    /// `width * height` does not fit in the address space.
    #[error("viewport {width}x{height} is too large to address")]
    ViewportOverflow { width: u32, height: u32 },

    /// Growing the framebuffer failed.
    #[error("failed to allocate a framebuffer of {pixels} pixels: {source}")]
    AllocationFailure {
        /// Requested pixel count.
        pixels: usize,
        #[source]
        source: TryReserveError,
    },

    /// Render parameters failed validation.
    #[error("invalid render parameters: {0}")]
    InvalidParams(String),
}
