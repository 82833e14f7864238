//! Perspective projection 4D -> 3D -> 2D
//!
//! Each step divides by the distance from the camera along the dropped
//! axis: `factor = distance / (distance - depth)`. Output is in unit
//! scale; mapping to pixels is done by [`Viewport`].

use crate::geometry::{Vec2, Vec3, Vec4};

/// Default camera distance along both the w and z axes
pub const DEFAULT_CAMERA_DISTANCE: f32 = 3.0;

/// Smallest divisor magnitude allowed in a perspective divide
pub const MIN_DIVISOR: f32 = 1e-3;

/// Result of a projection step
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Projected<T> {
    pub point: T,
    /// The divisor was too close to zero and was clamped
    pub clamped: bool,
}

/// Perspective scale factor for a point at `depth`
///
/// The divisor keeps its sign but is held at least [`MIN_DIVISOR`] away
/// from zero; the second value reports whether that happened.
pub fn perspective_factor(distance: f32, depth: f32) -> (f32, bool) {
    let divisor = distance - depth;
    if libm::fabsf(divisor) >= MIN_DIVISOR {
        (distance / divisor, false)
    } else {
        let clamped = if divisor < 0.0 {
            -MIN_DIVISOR
        } else {
            MIN_DIVISOR
        };
        (distance / clamped, true)
    }
}

/// Project a 4D point into 3D along w
pub fn project_4d_to_3d(point: Vec4, distance: f32) -> Projected<Vec3> {
    let (factor, clamped) = perspective_factor(distance, point.w);
    Projected {
        point: Vec3::new(point.x * factor, point.y * factor, point.z * factor),
        clamped,
    }
}

/// Project a 3D point onto the plane along z
pub fn project_3d_to_2d(point: Vec3, distance: f32) -> Projected<Vec2> {
    let (factor, clamped) = perspective_factor(distance, point.z);
    Projected {
        point: Vec2::new(point.x * factor, point.y * factor),
        clamped,
    }
}

/// Full 4D -> 2D pipeline
pub fn project(point: Vec4, distance: f32) -> Projected<Vec2> {
    let mid = project_4d_to_3d(point, distance);
    let flat = project_3d_to_2d(mid.point, distance);
    Projected {
        point: flat.point,
        clamped: mid.clamped || flat.clamped,
    }
}

/// Mapping from unit-scale projected coordinates to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Pixel column of the projection origin
    pub center_x: i32,
    /// Pixel row of the projection origin
    pub center_y: i32,
    /// Pixels per projected unit
    pub scale: f32,
    /// Visible width in pixels
    pub width: u32,
    /// Visible height in pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center_x: 64,
            center_y: 32,
            scale: 30.0,
            width: 128,
            height: 64,
        }
    }
}

impl Viewport {
    /// Map a projected point to a pixel, truncating toward zero
    pub fn to_screen(&self, p: Vec2) -> (i32, i32) {
        (
            (self.center_x as f32 + p.x * self.scale) as i32,
            (self.center_y as f32 + p.y * self.scale) as i32,
        )
    }

    /// Check whether a pixel lies inside the visible area
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}
