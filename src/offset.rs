//! Rigid offset applied to every resampled pose.

use crate::math::add3;
use crate::types::{InterpolationOffset, Pose};

impl InterpolationOffset {
    /// Apply the offset in the pose's local frame.
    ///
    /// The rotation is composed after the tracked rotation, then the
    /// translation is rotated into world space by the resulting orientation.
    /// Swapping the two steps moves the attachment point.
    pub fn apply(&self, pose: &Pose) -> Pose {
        let orientation = (pose.orientation * self.rotation).normalize();
        Pose {
            position: add3(pose.position, orientation.rotate(self.translation)),
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_eq(a: [f64; 3], b: [f64; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_identity_offset_is_noop() {
        let pose = Pose {
            position: [1.0, 2.0, 3.0],
            orientation: Quat::from_rotation_vector([0.2, 0.3, 0.4]),
        };
        let out = InterpolationOffset::default().apply(&pose);
        assert_vec_eq(out.position, pose.position);
        assert!(out.orientation.angle_to(pose.orientation) < 1e-9);
    }

    #[test]
    fn test_rotate_then_translate() {
        let offset = InterpolationOffset {
            rotation: Quat::from_axis_angle([0.0, 0.0, 1.0], FRAC_PI_2),
            translation: [1.0, 0.0, 0.0],
        };
        let pose = Pose {
            position: [0.5, 0.5, 0.5],
            orientation: Quat::IDENTITY,
        };
        let out = offset.apply(&pose);
        assert_vec_eq(out.position, [0.5, 1.5, 0.5]);
        assert!(out.orientation.angle_to(offset.rotation) < 1e-9);
    }

    #[test]
    fn test_offset_follows_tracked_rotation() {
        let offset = InterpolationOffset {
            rotation: Quat::IDENTITY,
            translation: [0.0, 0.0, 0.1],
        };
        // Tracked body pitched 90 degrees about X: local +Z points to world -Y.
        let pose = Pose {
            position: [0.0, 0.0, 0.0],
            orientation: Quat::from_axis_angle([1.0, 0.0, 0.0], FRAC_PI_2),
        };
        let out = offset.apply(&pose);
        assert_vec_eq(out.position, [0.0, -0.1, 0.0]);
    }
}
