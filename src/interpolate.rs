//! Blending between two bracketing poses.

use crate::math::lerp3;
use crate::types::Pose;

/// Interpolate between `prev` and `next` at blend factor `alpha`.
///
/// Position is blended linearly, orientation along the shortest arc.
/// `alpha` is clamped to [0, 1]; no extrapolation past either sample.
pub fn interpolate(prev: &Pose, next: &Pose, alpha: f64) -> Pose {
    let alpha = if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    };

    Pose {
        position: lerp3(prev.position, next.position, alpha),
        orientation: prev.orientation.slerp(next.orientation, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;

    fn pose(position: [f64; 3], rotation_vector: [f64; 3]) -> Pose {
        Pose {
            position,
            orientation: Quat::from_rotation_vector(rotation_vector),
        }
    }

    fn assert_pose_eq(a: &Pose, b: &Pose) {
        for i in 0..3 {
            assert!(
                (a.position[i] - b.position[i]).abs() < 1e-9,
                "{:?} != {:?}",
                a,
                b
            );
        }
        assert!(a.orientation.angle_to(b.orientation) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity() {
        let p = pose([0.1, -2.0, 3.5], [0.4, 0.1, -1.2]);
        for alpha in [0.0, 0.25, 0.5, 0.9, 1.0] {
            assert_pose_eq(&interpolate(&p, &p, alpha), &p);
        }
    }

    #[test]
    fn test_endpoints() {
        let a = pose([0.0, 0.0, 0.0], [0.0, 0.0, 0.3]);
        let b = pose([1.0, 2.0, -3.0], [1.0, 0.5, 0.0]);
        assert_pose_eq(&interpolate(&a, &b, 0.0), &a);
        assert_pose_eq(&interpolate(&a, &b, 1.0), &b);
    }

    #[test]
    fn test_midpoint() {
        let a = pose([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let b = pose([2.0, 4.0, 6.0], [0.0, 0.0, 1.0]);
        let mid = interpolate(&a, &b, 0.5);
        assert_pose_eq(&mid, &pose([1.0, 2.0, 3.0], [0.0, 0.0, 0.5]));
    }

    #[test]
    fn test_shortest_path_regardless_of_sign() {
        let ten = 10.0_f64.to_radians();
        let a = Pose {
            position: [0.0; 3],
            orientation: Quat::from_axis_angle([1.0, 0.0, 0.0], 0.3),
        };
        let b_rot = Quat::from_axis_angle([1.0, 0.0, 0.0], 0.3 + ten);

        for b_orientation in [b_rot, -b_rot] {
            let b = Pose {
                position: [0.0; 3],
                orientation: b_orientation,
            };
            for i in 0..=20 {
                let q = interpolate(&a, &b, i as f64 / 20.0).orientation;
                assert!(q.angle_to(a.orientation) <= ten + 1e-9);
                assert!(q.angle_to(b.orientation) <= ten + 1e-9);
            }
        }
    }

    #[test]
    fn test_alpha_is_clamped() {
        let a = pose([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        let b = pose([1.0, 1.0, 1.0], [0.0, 0.0, 1.0]);
        assert_pose_eq(&interpolate(&a, &b, -0.5), &a);
        assert_pose_eq(&interpolate(&a, &b, 1.5), &b);
        assert_pose_eq(&interpolate(&a, &b, f64::NAN), &a);
    }
}
