//! The column-major ray-casting sweep.
//!
//! Each depth slice is a scan line across the view frustum. Slices are
//! visited near to far, every column samples the height map along the scan
//! line, and a sample is drawn only when it rises above the column's
//! [`Skyline`]. Nearer, taller terrain therefore hides whatever lies behind
//! it without a per-pixel depth test.

use glam::Vec2;

use crate::framebuffer::Framebuffer;
use crate::maps::TerrainMaps;
use crate::params::RenderParams;
use crate::skyline::Skyline;

/// Left and right frustum edge directions for one frame.
///
/// Scaled so that, at depth `z`, `origin + edge * z` is the end of the scan
/// line at that depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Frustum {
    pub left: Vec2,
    pub right: Vec2,
}

impl Frustum {
    pub fn new(width: u32, height: u32, heading: f32, fov_scale: f32) -> Self {
        let fov = (width as f32 / height as f32 * fov_scale).atan();
        let length_scale = 1.0 / fov.cos();
        let edge = |angle: f32| Vec2::new(angle.cos(), angle.sin()) * length_scale;
        Self {
            left: edge(heading + fov),
            right: edge(heading - fov),
        }
    }
}

/// Depths of successive slices: starts at 1 with a unit step that grows by
/// `increment` after every slice, stopping before `distance`.
#[derive(Clone, Debug)]
pub(crate) struct DepthSchedule {
    z: f32,
    dz: f32,
    distance: f32,
    increment: f32,
}

impl DepthSchedule {
    pub fn new(distance: f32, increment: f32) -> Self {
        Self {
            z: 1.0,
            dz: 1.0,
            distance,
            increment,
        }
    }
}

impl Iterator for DepthSchedule {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.z >= self.distance {
            return None;
        }
        let z = self.z;
        self.z += self.dz;
        self.dz += self.increment;
        Some(z)
    }
}

/// Sweep the terrain into `fb`, which must already hold a cleared frame.
///
/// Returns the number of depth slices marched.
pub(crate) fn render_frame(
    maps: &TerrainMaps,
    origin: Vec2,
    params: &RenderParams,
    heading: f32,
    fb: &mut Framebuffer,
) -> u32 {
    let width = fb.width();
    let height = fb.height();
    let columns = width as usize;

    let frustum = Frustum::new(width, height, heading, params.fov_scale);
    let horizon = params.horizon * height as f32;
    let mut skyline = Skyline::new(columns);
    let mut slices = 0;

    for z in DepthSchedule::new(params.distance, params.dz_increment) {
        let mut point = frustum.left * z + origin;
        let end = frustum.right * z + origin;
        let step = (end - point) / width as f32;
        let projection = params.scale * height as f32 / z;

        for x in 0..columns {
            let terrain = maps.sample_height(point.x, point.y) as f32;
            let row = horizon - (params.baseline - terrain) * projection;
            if let Some((top, new_top)) = skyline.raise(x, row) {
                fb.draw_column(x as u32, top, new_top, maps.sample_color(point.x, point.y));
            }
            point += step;
        }
        slices += 1;
    }

    slices
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_frustum_square_view_heading_east() {
        let frustum = Frustum::new(100, 100, 0.0, 0.8);
        // Edges land on x = 1 with half-width tan(fov) = 0.8.
        assert!((frustum.left - Vec2::new(1.0, 0.8)).length() < EPSILON);
        assert!((frustum.right - Vec2::new(1.0, -0.8)).length() < EPSILON);
    }

    #[test]
    fn test_frustum_rotates_with_heading() {
        let frustum = Frustum::new(100, 100, FRAC_PI_2, 0.8);
        assert!((frustum.left - Vec2::new(-0.8, 1.0)).length() < EPSILON);
        assert!((frustum.right - Vec2::new(0.8, 1.0)).length() < EPSILON);
    }

    #[test]
    fn test_frustum_widens_with_aspect() {
        let narrow = Frustum::new(100, 100, 0.0, 0.8);
        let wide = Frustum::new(200, 100, 0.0, 0.8);
        assert!(wide.left.y > narrow.left.y);
    }

    #[test]
    fn test_depth_schedule_starts_fine_then_coarsens() {
        let depths: Vec<f32> = DepthSchedule::new(512.0, 0.005).collect();
        assert_eq!(depths[0], 1.0);
        assert_eq!(depths[1], 2.0);
        assert!((depths[2] - 3.005).abs() < EPSILON);
        assert!((depths[3] - 4.015).abs() < EPSILON);

        let first_gap = depths[1] - depths[0];
        let last_gap = depths[depths.len() - 1] - depths[depths.len() - 2];
        assert!(last_gap > first_gap);
        assert!(depths.iter().all(|&z| z < 512.0));
        assert!(depths.len() < 511);
    }

    #[test]
    fn test_depth_schedule_uniform_without_increment() {
        assert_eq!(DepthSchedule::new(512.0, 0.0).count(), 511);
    }

    #[test]
    fn test_depth_schedule_empty_when_distance_within_first_step() {
        assert_eq!(DepthSchedule::new(1.0, 0.005).count(), 0);
        assert_eq!(DepthSchedule::new(1.5, 0.005).count(), 1);
    }
}
