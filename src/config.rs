use crate::types::{InterpolationOffset, RotationEncoding};
use crate::{ImportError, Result};

/// Vicon Tracker's default capture rate.
pub const DEFAULT_INPUT_FRAME_RATE: f64 = 100.0;

/// Default output rate when the host does not supply one.
pub const DEFAULT_OUTPUT_FRAME_RATE: f64 = 24.0;

/// Which tracked object to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetObject {
    /// Position in the header's object list.
    Index(usize),
    /// Qualified `subject:segment` name, or the bare subject name.
    Name(String),
}

impl Default for TargetObject {
    fn default() -> Self {
        TargetObject::Index(0)
    }
}

/// Per-run import settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Capture rate of the table, in frames per second.
    pub input_frame_rate: f64,
    /// Frame rate of the destination timeline.
    pub output_frame_rate: f64,
    pub target_object: TargetObject,
    pub rotation_encoding: RotationEncoding,
    pub offset: InterpolationOffset,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            input_frame_rate: DEFAULT_INPUT_FRAME_RATE,
            output_frame_rate: DEFAULT_OUTPUT_FRAME_RATE,
            target_object: TargetObject::default(),
            rotation_encoding: RotationEncoding::default(),
            offset: InterpolationOffset::default(),
        }
    }
}

impl ImportConfig {
    /// Defaults overlaid with `VICON_CSV_*` environment variables.
    ///
    /// - `VICON_CSV_INPUT_FPS`, `VICON_CSV_OUTPUT_FPS`: frame rates
    /// - `VICON_CSV_OBJECT`: object name, or `#n` for an index
    /// - `VICON_CSV_ENCODING`: `euler` or `axis-angle` (also `axis_angle`,
    ///   `helical`)
    /// - `VICON_CSV_OFFSET_ROT`: `rx,ry,rz` in degrees
    /// - `VICON_CSV_OFFSET_POS`: `x,y,z` in meters
    ///
    /// Values that fail to parse keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let target_object = read_env("VICON_CSV_OBJECT")
            .map(|v| parse_target(&v))
            .unwrap_or(defaults.target_object);

        let rotation_encoding = read_env("VICON_CSV_ENCODING")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rotation_encoding);

        let offset_rot = read_env("VICON_CSV_OFFSET_ROT")
            .and_then(|v| parse_triple(&v))
            .unwrap_or([0.0; 3]);
        let offset_pos = read_env("VICON_CSV_OFFSET_POS")
            .and_then(|v| parse_triple(&v))
            .unwrap_or([0.0; 3]);

        Self {
            input_frame_rate: read_env_f64("VICON_CSV_INPUT_FPS", defaults.input_frame_rate),
            output_frame_rate: read_env_f64("VICON_CSV_OUTPUT_FPS", defaults.output_frame_rate),
            target_object,
            rotation_encoding,
            offset: InterpolationOffset::from_euler_degrees(
                offset_rot[0],
                offset_rot[1],
                offset_rot[2],
                offset_pos,
            ),
        }
    }

    /// Reject rates the resampler cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (label, rate) in [
            ("input frame rate", self.input_frame_rate),
            ("output frame rate", self.output_frame_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ImportError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    label, rate
                )));
            }
        }
        Ok(())
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_env_f64(name: &str, default: f64) -> f64 {
    read_env(name)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

/// `#3` selects by index, anything else by name.
pub fn parse_target(value: &str) -> TargetObject {
    let value = value.trim();
    match value.strip_prefix('#').map(|n| n.parse::<usize>()) {
        Some(Ok(index)) => TargetObject::Index(index),
        _ => TargetObject::Name(value.to_string()),
    }
}

/// Parse `a,b,c` into three floats.
pub fn parse_triple(value: &str) -> Option<[f64; 3]> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    match parts.as_slice() {
        [a, b, c] => Some([*a, *b, *c]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ImportConfig::default();
        assert_eq!(config.input_frame_rate, 100.0);
        assert_eq!(config.target_object, TargetObject::Index(0));
        assert!(config.offset.is_identity());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut config = ImportConfig::default();
        config.output_frame_rate = 0.0;
        assert!(matches!(config.validate(), Err(ImportError::InvalidConfig(_))));

        config.output_frame_rate = 30.0;
        config.input_frame_rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("#2"), TargetObject::Index(2));
        assert_eq!(parse_target(" Wand "), TargetObject::Name("Wand".into()));
        assert_eq!(parse_target("#x"), TargetObject::Name("#x".into()));
    }

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("1, 2.5,-3"), Some([1.0, 2.5, -3.0]));
        assert_eq!(parse_triple("1,2"), None);
        assert_eq!(parse_triple("1,a,3"), None);
    }
}
