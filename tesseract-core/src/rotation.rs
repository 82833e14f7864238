//! 4D plane rotations
//!
//! A general 4D rotation is composed from six rotations, one per
//! coordinate plane. 4D rotations do not commute, so the plane order is
//! fixed: XY, XZ, XW, YZ, YW, ZW.

use crate::geometry::Vec4;

/// Per-plane multipliers applied to the base angle (XY..ZW)
pub const PLANE_RATES: [f32; 6] = [1.0, 0.7, 0.5, 1.1, 0.9, 1.3];

/// Coordinate plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Plane {
    XY,
    XZ,
    XW,
    YZ,
    YW,
    ZW,
}

impl Plane {
    /// All planes in application order
    pub const ALL: [Plane; 6] = [
        Plane::XY,
        Plane::XZ,
        Plane::XW,
        Plane::YZ,
        Plane::YW,
        Plane::ZW,
    ];
}

/// Rotation angle for each plane, in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationAngles {
    pub xy: f32,
    pub xz: f32,
    pub xw: f32,
    pub yz: f32,
    pub yw: f32,
    pub zw: f32,
}

impl RotationAngles {
    /// No rotation
    pub const ZERO: RotationAngles = RotationAngles {
        xy: 0.0,
        xz: 0.0,
        xw: 0.0,
        yz: 0.0,
        yw: 0.0,
        zw: 0.0,
    };

    /// Derive all six angles from the animation's base angle
    pub fn from_base(base: f32) -> Self {
        let [xy, xz, xw, yz, yw, zw] = PLANE_RATES.map(|rate| base * rate);
        Self {
            xy,
            xz,
            xw,
            yz,
            yw,
            zw,
        }
    }

    /// Angle for one plane
    pub fn get(&self, plane: Plane) -> f32 {
        match plane {
            Plane::XY => self.xy,
            Plane::XZ => self.xz,
            Plane::XW => self.xw,
            Plane::YZ => self.yz,
            Plane::YW => self.yw,
            Plane::ZW => self.zw,
        }
    }
}

/// Rotate the pair (a, b) by `theta`
#[inline]
fn rotate_pair(a: f32, b: f32, theta: f32) -> (f32, f32) {
    let (s, c) = libm::sincosf(theta);
    (a * c - b * s, a * s + b * c)
}

/// Rotate a point within a single plane
pub fn rotate_plane(p: Vec4, plane: Plane, theta: f32) -> Vec4 {
    let Vec4 {
        mut x,
        mut y,
        mut z,
        mut w,
    } = p;
    match plane {
        Plane::XY => (x, y) = rotate_pair(x, y, theta),
        Plane::XZ => (x, z) = rotate_pair(x, z, theta),
        Plane::XW => (x, w) = rotate_pair(x, w, theta),
        Plane::YZ => (y, z) = rotate_pair(y, z, theta),
        Plane::YW => (y, w) = rotate_pair(y, w, theta),
        Plane::ZW => (z, w) = rotate_pair(z, w, theta),
    }
    Vec4::new(x, y, z, w)
}

/// Apply all six plane rotations in order XY, XZ, XW, YZ, YW, ZW
pub fn rotate(p: Vec4, angles: &RotationAngles) -> Vec4 {
    Plane::ALL
        .iter()
        .fold(p, |acc, &plane| rotate_plane(acc, plane, angles.get(plane)))
}

/// Undo `rotate`: negated angles, reverse plane order
pub fn rotate_inverse(p: Vec4, angles: &RotationAngles) -> Vec4 {
    Plane::ALL
        .iter()
        .rev()
        .fold(p, |acc, &plane| rotate_plane(acc, plane, -angles.get(plane)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn assert_close(a: Vec4, b: Vec4) {
        assert!(
            (a.x - b.x).abs() < EPS
                && (a.y - b.y).abs() < EPS
                && (a.z - b.z).abs() < EPS
                && (a.w - b.w).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let p = Vec4::new(1.0, -1.0, 1.0, 1.0);
        assert_close(rotate(p, &RotationAngles::ZERO), p);
    }

    #[test]
    fn test_quarter_turn_xy() {
        let p = Vec4::new(1.0, 0.0, 0.5, -0.5);
        let r = rotate_plane(p, Plane::XY, FRAC_PI_2);
        assert_close(r, Vec4::new(0.0, 1.0, 0.5, -0.5));
    }

    #[test]
    fn test_quarter_turn_zw() {
        let p = Vec4::new(0.25, 0.5, 1.0, 0.0);
        let r = rotate_plane(p, Plane::ZW, FRAC_PI_2);
        assert_close(r, Vec4::new(0.25, 0.5, 0.0, 1.0));
    }

    #[test]
    fn test_order_matters() {
        let p = Vec4::new(1.0, 0.0, 0.0, 0.0);
        let angles = RotationAngles {
            xy: FRAC_PI_2,
            yz: FRAC_PI_2,
            ..RotationAngles::ZERO
        };
        // XY first: x -> y, then YZ: y -> z
        assert_close(rotate(p, &angles), Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_from_base() {
        let angles = RotationAngles::from_base(0.2);
        assert!((angles.xy - 0.2).abs() < 1e-6);
        assert!((angles.xz - 0.14).abs() < 1e-6);
        assert!((angles.xw - 0.1).abs() < 1e-6);
        assert!((angles.yz - 0.22).abs() < 1e-6);
        assert!((angles.yw - 0.18).abs() < 1e-6);
        assert!((angles.zw - 0.26).abs() < 1e-6);
        assert_eq!(RotationAngles::from_base(0.0), RotationAngles::ZERO);
    }

    fn coord() -> impl Strategy<Value = f32> {
        -2.0f32..2.0
    }

    fn angle() -> impl Strategy<Value = f32> {
        -10.0f32..10.0
    }

    proptest! {
        #[test]
        fn prop_inverse_round_trip(
            x in coord(), y in coord(), z in coord(), w in coord(),
            a in prop::array::uniform6(angle()),
        ) {
            let p = Vec4::new(x, y, z, w);
            let angles = RotationAngles { xy: a[0], xz: a[1], xw: a[2], yz: a[3], yw: a[4], zw: a[5] };
            let back = rotate_inverse(rotate(p, &angles), &angles);
            prop_assert!((back.x - p.x).abs() < 1e-3);
            prop_assert!((back.y - p.y).abs() < 1e-3);
            prop_assert!((back.z - p.z).abs() < 1e-3);
            prop_assert!((back.w - p.w).abs() < 1e-3);
        }

        #[test]
        fn prop_rotation_preserves_length(
            x in coord(), y in coord(), z in coord(), w in coord(),
            base in angle(),
        ) {
            let p = Vec4::new(x, y, z, w);
            let r = rotate(p, &RotationAngles::from_base(base));
            let len = |v: Vec4| v.x * v.x + v.y * v.y + v.z * v.z + v.w * v.w;
            prop_assert!((len(r) - len(p)).abs() < 1e-3);
        }
    }
}
