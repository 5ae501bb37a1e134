use crate::math::Quat;
use crate::table::{RawRow, FIELDS_PER_OBJECT};
use crate::types::{Pose, RotationEncoding};
use crate::{ImportError, Result};

/// The device reports positions in millimeters.
pub const MILLIMETERS_PER_METER: f64 = 1000.0;

/// Parse one numeric field, rejecting text as well as NaN and infinities.
fn parse_field(row: &RawRow, field: usize) -> Result<f64> {
    let raw = row.get(field).unwrap_or("");
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ImportError::Parse {
            row: row.row,
            field,
            value: raw.to_string(),
        }),
    }
}

/// 0-based capture frame number of a row (field 0 holds the 1-based one).
pub fn frame_number(row: &RawRow) -> Result<i64> {
    let raw = row.get(0).unwrap_or("");
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| ImportError::Parse {
            row: row.row,
            field: 0,
            value: raw.to_string(),
        })
}

/// Reads one object's sextet out of a data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseExtractor {
    column: usize,
    encoding: RotationEncoding,
}

impl PoseExtractor {
    pub fn new(column: usize, encoding: RotationEncoding) -> Self {
        Self { column, encoding }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn encoding(&self) -> RotationEncoding {
        self.encoding
    }

    /// True when the row holds all six fields and the device had a lock.
    pub fn is_data_bearing(&self, row: &RawRow) -> bool {
        row.len() >= self.column + FIELDS_PER_OBJECT
            && row.get(self.column).is_some_and(|f| !f.is_empty())
    }

    /// Pose of the object in this row, or `None` when the row does not
    /// carry it.
    pub fn extract(&self, row: &RawRow) -> Result<Option<Pose>> {
        if !self.is_data_bearing(row) {
            return Ok(None);
        }

        let c = self.column;
        let r = [
            parse_field(row, c)?,
            parse_field(row, c + 1)?,
            parse_field(row, c + 2)?,
        ];
        let position = [
            parse_field(row, c + 3)? / MILLIMETERS_PER_METER,
            parse_field(row, c + 4)? / MILLIMETERS_PER_METER,
            parse_field(row, c + 5)? / MILLIMETERS_PER_METER,
        ];

        let orientation = match self.encoding {
            RotationEncoding::Euler => Quat::from_euler_xyz(r[0], r[1], r[2]),
            RotationEncoding::AxisAngle => Quat::from_rotation_vector(r),
        };

        Ok(Some(Pose {
            position,
            orientation,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn row(fields: &[&str]) -> RawRow {
        RawRow::new(7, fields.iter().copied())
    }

    #[test]
    fn test_frame_number_is_zero_based() {
        assert_eq!(frame_number(&row(&["1", "0"])).unwrap(), 0);
        assert_eq!(frame_number(&row(&["250"])).unwrap(), 249);
    }

    #[test]
    fn test_frame_number_rejects_text() {
        match frame_number(&row(&["Frame", "0"])) {
            Err(ImportError::Parse { row: r, field, value }) => {
                assert_eq!(r, 7);
                assert_eq!(field, 0);
                assert_eq!(value, "Frame");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_frame_number_rejects_min_value() {
        let min = i64::MIN.to_string();
        match frame_number(&row(&[&min, "0"])) {
            Err(ImportError::Parse { field, value, .. }) => {
                assert_eq!(field, 0);
                assert_eq!(value, min);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_extract_axis_angle() {
        let angle = FRAC_PI_2.to_string();
        let r = row(&["1", "0", "0", "0", &angle, "1000", "-250", "5"]);
        let pose = PoseExtractor::new(2, RotationEncoding::AxisAngle)
            .extract(&r)
            .unwrap()
            .unwrap();

        assert!((pose.position[0] - 1.0).abs() < 1e-12);
        assert!((pose.position[1] + 0.25).abs() < 1e-12);
        assert!((pose.position[2] - 0.005).abs() < 1e-12);

        let expected = Quat::from_axis_angle([0.0, 0.0, 1.0], FRAC_PI_2);
        assert!(pose.orientation.angle_to(expected) < 1e-9);
    }

    #[test]
    fn test_extract_zero_vector_is_identity() {
        let r = row(&["1", "0", "0", "0", "0", "0", "0", "0"]);
        let pose = PoseExtractor::new(2, RotationEncoding::AxisAngle)
            .extract(&r)
            .unwrap()
            .unwrap();
        assert_eq!(pose.orientation, Quat::IDENTITY);
    }

    #[test]
    fn test_extract_euler() {
        let angle = FRAC_PI_2.to_string();
        let r = row(&["1", "0", &angle, "0", "0", "0", "0", "0"]);
        let pose = PoseExtractor::new(2, RotationEncoding::Euler)
            .extract(&r)
            .unwrap()
            .unwrap();
        let expected = Quat::from_axis_angle([1.0, 0.0, 0.0], FRAC_PI_2);
        assert!(pose.orientation.angle_to(expected) < 1e-9);
    }

    #[test]
    fn test_second_object_column() {
        let r = row(&[
            "1", "0", "0", "0", "0", "1", "2", "3", "0", "0", "0", "10", "20", "30",
        ]);
        let pose = PoseExtractor::new(8, RotationEncoding::AxisAngle)
            .extract(&r)
            .unwrap()
            .unwrap();
        assert!((pose.position[2] - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_absent_rows() {
        let extractor = PoseExtractor::new(2, RotationEncoding::AxisAngle);
        // Bookkeeping marker
        assert_eq!(extractor.extract(&row(&["12"])).unwrap(), None);
        // Too short for the sextet
        assert_eq!(
            extractor.extract(&row(&["1", "0", "0", "0", "0", "0"])).unwrap(),
            None
        );
        // Object not tracked in this sample
        assert_eq!(
            extractor
                .extract(&row(&["1", "0", "", "", "", "", "", ""]))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_number_fails() {
        let extractor = PoseExtractor::new(2, RotationEncoding::AxisAngle);
        let r = row(&["1", "0", "0", "0", "0", "12.5", "oops", "0"]);
        match extractor.extract(&r) {
            Err(ImportError::Parse { field, value, .. }) => {
                assert_eq!(field, 6);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected: {:?}", other),
        }

        let r = row(&["1", "0", "0", "0", "0", "NaN", "0", "0"]);
        assert!(extractor.extract(&r).is_err());
    }
}
