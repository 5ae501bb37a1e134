//! Minimal 3-vector and unit quaternion helpers.
//!
//! Vectors are plain `[f64; 3]` arrays. Quaternions are stored as
//! `[x, y, z, w]` components, scalar last, and composition follows the
//! Hamilton product so that `a * b` applies `b` first, then `a`.

use std::ops::{Mul, Neg};

/// 3-vector `[x, y, z]`.
pub type Vec3 = [f64; 3];

/// Dot products above this are treated as coincident rotations and blended
/// linearly, where `sin(theta)` would lose precision.
const SLERP_LINEAR_THRESHOLD: f64 = 1.0 - 1e-9;

#[inline]
pub fn add3(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale3(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// Linear blend `(1 - t) * a + t * b`.
#[inline]
pub fn lerp3(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
fn cross3(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm3(a: Vec3) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

/// Rotation quaternion.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis[0] * s, axis[1] * s, axis[2] * s, c)
    }

    /// Rotation encoded as a vector whose length is the angle in radians and
    /// whose direction is the axis. The zero vector maps to identity.
    pub fn from_rotation_vector(v: Vec3) -> Self {
        if v == [0.0, 0.0, 0.0] {
            return Self::IDENTITY;
        }
        let angle = norm3(v);
        Self::from_axis_angle(scale3(v, angle.recip()), angle)
    }

    /// XYZ Euler angles in radians: X is applied first, then Y, then Z.
    pub fn from_euler_xyz(x: f64, y: f64, z: f64) -> Self {
        let qx = Self::from_axis_angle([1.0, 0.0, 0.0], x);
        let qy = Self::from_axis_angle([0.0, 1.0, 0.0], y);
        let qz = Self::from_axis_angle([0.0, 0.0, 1.0], z);
        qz * qy * qx
    }

    /// Components as `[x, y, z, w]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub fn dot(self, other: Quat) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(self) -> Self {
        let len2 = self.dot(self);
        if len2 > 0.0 {
            let inv = len2.sqrt().recip();
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Inverse of a unit quaternion.
    pub fn inverse(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate `v` by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = [self.x, self.y, self.z];
        let t = scale3(cross3(u, v), 2.0);
        add3(add3(v, scale3(t, self.w)), cross3(u, t))
    }

    /// Angle in radians of the smallest rotation taking `self` to `other`.
    pub fn angle_to(self, other: Quat) -> f64 {
        let d = self.inverse() * other;
        2.0 * norm3([d.x, d.y, d.z]).atan2(d.w.abs())
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// `q` and `-q` describe the same rotation, so the second endpoint is
    /// flipped whenever the two lie in opposite hemispheres.
    pub fn slerp(self, other: Quat, t: f64) -> Self {
        let mut d = self.dot(other);
        let mut b = other;
        if d < 0.0 {
            b = -b;
            d = -d;
        }

        let (wa, wb) = if d > SLERP_LINEAR_THRESHOLD {
            (1.0 - t, t)
        } else {
            let theta = d.acos();
            let inv_sin = theta.sin().recip();
            (
                ((1.0 - t) * theta).sin() * inv_sin,
                (t * theta).sin() * inv_sin,
            )
        };

        Self::new(
            self.x * wa + b.x * wb,
            self.y * wa + b.y * wb,
            self.z * wa + b.z * wb,
            self.w * wa + b.w * wb,
        )
        .normalize()
    }
}

impl Mul for Quat {
    type Output = Quat;

    fn mul(self, r: Quat) -> Quat {
        Quat::new(
            self.w * r.x + self.x * r.w + self.y * r.z - self.z * r.y,
            self.w * r.y - self.x * r.z + self.y * r.w + self.z * r.x,
            self.w * r.z + self.x * r.y - self.y * r.x + self.z * r.w,
            self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
        )
    }
}

impl Neg for Quat {
    type Output = Quat;

    fn neg(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, -self.w)
    }
}
