use crate::math::{Quat, Vec3};

/// Pose of one tracked rigid body.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in meters [x, y, z].
    pub position: Vec3,
    /// Unit rotation quaternion.
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            orientation: Quat::IDENTITY,
        }
    }
}

/// One resampled pose on the output timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSample {
    /// 1-based output frame number.
    pub frame: u64,
    pub pose: Pose,
}

/// How the first three fields of an object's sextet encode its rotation.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationEncoding {
    /// Three independent angles in radians, applied X, then Y, then Z.
    Euler = 0,
    /// Rotation vector: length is the angle in radians, direction the axis.
    #[default]
    AxisAngle = 1,
}

impl std::str::FromStr for RotationEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(RotationEncoding::Euler),
            "axis-angle" | "axis_angle" | "helical" => Ok(RotationEncoding::AxisAngle),
            other => Err(format!("unknown rotation encoding '{}'", other)),
        }
    }
}

/// Fixed rigid offset applied in the tracked body's own frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationOffset {
    pub rotation: Quat,
    /// Translation in meters, expressed in the offset body's local frame.
    pub translation: Vec3,
}

impl Default for InterpolationOffset {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: [0.0; 3],
        }
    }
}

impl InterpolationOffset {
    /// Offset from XYZ Euler angles in degrees and a translation in meters.
    pub fn from_euler_degrees(rx: f64, ry: f64, rz: f64, translation: Vec3) -> Self {
        Self {
            rotation: Quat::from_euler_xyz(rx.to_radians(), ry.to_radians(), rz.to_radians()),
            translation,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.rotation == Quat::IDENTITY && self.translation == [0.0; 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("euler".parse::<RotationEncoding>(), Ok(RotationEncoding::Euler));
        assert_eq!(
            " Axis-Angle ".parse::<RotationEncoding>(),
            Ok(RotationEncoding::AxisAngle)
        );
        assert_eq!("helical".parse::<RotationEncoding>(), Ok(RotationEncoding::AxisAngle));
        assert!("quaternion".parse::<RotationEncoding>().is_err());
    }

    #[test]
    fn test_offset_from_euler_degrees() {
        let offset = InterpolationOffset::from_euler_degrees(0.0, 0.0, 90.0, [1.0, 0.0, 0.0]);
        let v = offset.rotation.rotate([1.0, 0.0, 0.0]);
        assert!(v[0].abs() < 1e-9);
        assert!((v[1] - 1.0).abs() < 1e-9);
        assert!(!offset.is_identity());
        assert!(InterpolationOffset::default().is_identity());
    }
}
