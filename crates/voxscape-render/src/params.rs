//! Projection and marching tunables.

use crate::error::RenderError;

/// Vertical exaggeration applied to projected terrain height.
pub const DEFAULT_SCALE: f32 = 0.65;
/// Far clip distance in map units.
pub const DEFAULT_DISTANCE: f32 = 512.0;
/// Fraction of the screen height used as the horizon row.
pub const DEFAULT_HORIZON: f32 = 0.4;
/// Multiplier on the aspect ratio that sets the field of view.
pub const DEFAULT_FOV_SCALE: f32 = 0.8;
/// Widest frame a context will render.
pub const DEFAULT_MAX_COLUMNS: u32 = 2048;
/// Reference elevation the camera looks from, in height-map units.
pub const DEFAULT_BASELINE: f32 = 50.0;
/// Growth of the depth step per slice.
pub const DEFAULT_DZ_INCREMENT: f32 = 0.005;
/// Largest accepted far distance. Unit steps stop advancing an `f32` depth
/// long before 2^24, so the sweep would never terminate.
pub const MAX_DISTANCE: f32 = 65536.0;

/// Tunables for the ray-casting sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    pub scale: f32,
    pub distance: f32,
    pub horizon: f32,
    pub fov_scale: f32,
    pub max_columns: u32,
    pub baseline: f32,
    /// Added to the depth step after every slice, so sampling coarsens with
    /// distance. Zero gives uniform unit steps.
    pub dz_increment: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            distance: DEFAULT_DISTANCE,
            horizon: DEFAULT_HORIZON,
            fov_scale: DEFAULT_FOV_SCALE,
            max_columns: DEFAULT_MAX_COLUMNS,
            baseline: DEFAULT_BASELINE,
            dz_increment: DEFAULT_DZ_INCREMENT,
        }
    }
}

impl RenderParams {
    /// Reject values that would make the sweep diverge or produce garbage.
    pub fn validate(&self) -> Result<(), RenderError> {
        let finite = [
            ("scale", self.scale),
            ("distance", self.distance),
            ("horizon", self.horizon),
            ("fov_scale", self.fov_scale),
            ("baseline", self.baseline),
            ("dz_increment", self.dz_increment),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(RenderError::InvalidParams(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.distance <= 0.0 || self.distance > MAX_DISTANCE {
            return Err(RenderError::InvalidParams(format!(
                "distance must be in (0, {MAX_DISTANCE}], got {}",
                self.distance
            )));
        }
        if self.fov_scale <= 0.0 {
            return Err(RenderError::InvalidParams(format!(
                "fov_scale must be positive, got {}",
                self.fov_scale
            )));
        }
        if self.dz_increment < 0.0 {
            return Err(RenderError::InvalidParams(format!(
                "dz_increment must not be negative, got {}",
                self.dz_increment
            )));
        }
        if self.max_columns == 0 {
            return Err(RenderError::InvalidParams(
                "max_columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
