//! Orientation conventions ↔ unit vectors (the codec).
//!
//! Purpose
//! - Convert structural readings (trend/plunge, strike/dip, dip-direction)
//!   into unit vectors in a fixed North-East-Down frame, and back.
//! - Centralize every convention conversion; no other module does angle
//!   arithmetic directly.
//!
//! Conventions
//! - Frame: x = North, y = East, z = Down. Azimuths clockwise from North,
//!   inclinations downward from horizontal. Degrees at the API boundary,
//!   converted to radians exactly once per call.
//! - A plane is represented by its pole, the downward normal: the line at
//!   trend = strike − 90°, plunge = 90° − dip (right-hand rule, dip
//!   direction = strike + 90°).
//! - Vector recovery flips into the lower hemisphere (orientations are
//!   axial). Vertical lines recover trend = 0; horizontal planes recover
//!   strike = 0. Both are defined conventions, not errors.

use nalgebra::Vector3;
use std::fmt;

use crate::cfg::{HORIZ_EPS, UNIT_EPS};

/// Errors surfaced by convention conversions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CodecError {
    /// Angular input out of range or non-finite.
    InvalidAngle { name: &'static str, value: f64 },
    /// Vector too short (or non-finite) to carry a direction.
    DegenerateVector { norm: f64 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidAngle { name, value } => {
                write!(f, "invalid {name}: {value} (out of range or non-finite)")
            }
            CodecError::DegenerateVector { norm } => {
                write!(f, "degenerate vector (norm {norm})")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Wrap an azimuth into [0, 360). Non-finite input is rejected.
pub fn normalize_azimuth(deg: f64) -> Result<f64, CodecError> {
    if !deg.is_finite() {
        return Err(CodecError::InvalidAngle {
            name: "azimuth",
            value: deg,
        });
    }
    let mut a = deg % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    // `-1e-17 % 360 + 360` rounds to 360.0 exactly; fold it back.
    if a >= 360.0 {
        a = 0.0;
    }
    Ok(a)
}

fn check_inclination(name: &'static str, deg: f64) -> Result<f64, CodecError> {
    if !deg.is_finite() || !(0.0..=90.0).contains(&deg) {
        return Err(CodecError::InvalidAngle { name, value: deg });
    }
    Ok(deg)
}

/// Unit vector of a line given trend and plunge (degrees).
///
/// Fails with `InvalidAngle` if plunge ∉ [0, 90] or trend is non-finite.
pub fn line_to_vector(trend: f64, plunge: f64) -> Result<Vector3<f64>, CodecError> {
    let plunge = check_inclination("plunge", plunge)?;
    let t = normalize_azimuth(trend)?.to_radians();
    let p = plunge.to_radians();
    Ok(Vector3::new(
        p.cos() * t.cos(),
        p.cos() * t.sin(),
        p.sin(),
    ))
}

/// Pole (downward unit normal) of a plane given strike and dip (degrees).
///
/// Fails with `InvalidAngle` if dip ∉ [0, 90] or strike is non-finite.
pub fn plane_to_pole(strike: f64, dip: f64) -> Result<Vector3<f64>, CodecError> {
    let dip = check_inclination("dip", dip)?;
    let strike = normalize_azimuth(strike)?;
    line_to_vector(strike - 90.0, 90.0 - dip)
}

/// Strike of a plane given its dip direction: `normalize(dip_dir − 90)`.
pub fn dip_direction_to_strike(dip_dir: f64) -> Result<f64, CodecError> {
    normalize_azimuth(dip_dir - 90.0)
}

/// Normalize and flip into the lower hemisphere (z ≥ 0).
fn lower_hemisphere_unit(v: Vector3<f64>) -> Result<Vector3<f64>, CodecError> {
    let norm = v.norm();
    if !norm.is_finite() || norm < UNIT_EPS {
        return Err(CodecError::DegenerateVector { norm });
    }
    let u = v / norm;
    Ok(if u.z < 0.0 { -u } else { u })
}

/// Recover (trend, plunge) from a direction vector.
///
/// The vector need not be normalized; it is flipped into the lower
/// hemisphere first. A vertical vector recovers trend = 0 by convention.
/// Fails with `DegenerateVector` for zero or non-finite input.
pub fn vector_to_line(v: Vector3<f64>) -> Result<(f64, f64), CodecError> {
    let u = lower_hemisphere_unit(v)?;
    let plunge = u.z.clamp(-1.0, 1.0).asin().to_degrees();
    let trend = if u.x.hypot(u.y) < HORIZ_EPS {
        0.0
    } else {
        normalize_azimuth(u.y.atan2(u.x).to_degrees())?
    };
    Ok((trend, plunge.clamp(0.0, 90.0)))
}

/// Recover (strike, dip) of the plane whose pole is `v`.
///
/// Exact inverse of [`plane_to_pole`] away from the vertical pole; a
/// vertical pole (horizontal plane) recovers (0, 0) by convention.
pub fn pole_to_plane(v: Vector3<f64>) -> Result<(f64, f64), CodecError> {
    let u = lower_hemisphere_unit(v)?;
    if u.x.hypot(u.y) < HORIZ_EPS {
        return Ok((0.0, 0.0));
    }
    let plunge = u.z.clamp(-1.0, 1.0).asin().to_degrees();
    let strike = normalize_azimuth(u.y.atan2(u.x).to_degrees() + 90.0)?;
    Ok((strike, (90.0 - plunge).clamp(0.0, 90.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn angular_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn azimuth_wrapping() {
        assert_eq!(normalize_azimuth(0.0).unwrap(), 0.0);
        assert_eq!(normalize_azimuth(360.0).unwrap(), 0.0);
        assert_eq!(normalize_azimuth(-90.0).unwrap(), 270.0);
        assert_eq!(normalize_azimuth(725.0).unwrap(), 5.0);
        assert!(normalize_azimuth(f64::NAN).is_err());
        assert!(normalize_azimuth(f64::INFINITY).is_err());
    }

    #[test]
    fn dip_direction_identities() {
        assert_eq!(dip_direction_to_strike(90.0).unwrap(), 0.0);
        assert_eq!(dip_direction_to_strike(0.0).unwrap(), 270.0);
        for d in [0.0, 45.0, 90.0, 180.0, 359.9] {
            let s = dip_direction_to_strike(d).unwrap();
            assert!((0.0..360.0).contains(&s));
        }
    }

    #[test]
    fn cardinal_lines() {
        // North, horizontal.
        let v = line_to_vector(0.0, 0.0).unwrap();
        assert!((v - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        // East, horizontal.
        let v = line_to_vector(90.0, 0.0).unwrap();
        assert!((v - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        // Vertical.
        let v = line_to_vector(123.0, 90.0).unwrap();
        assert!((v - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn vertical_line_recovers_zero_trend() {
        let (t, p) = vector_to_line(Vector3::new(0.0, 0.0, -3.0)).unwrap();
        assert_eq!(t, 0.0);
        assert!((p - 90.0).abs() < 1e-9);
    }

    #[test]
    fn horizontal_plane_recovers_zero_strike() {
        let pole = plane_to_pole(217.0, 0.0).unwrap();
        let (s, d) = pole_to_plane(pole).unwrap();
        assert_eq!(s, 0.0);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn pole_is_perpendicular_to_strike_line() {
        let strike = 30.0;
        let pole = plane_to_pole(strike, 60.0).unwrap();
        let strike_line = line_to_vector(strike, 0.0).unwrap();
        assert!(pole.dot(&strike_line).abs() < 1e-12);
        // Downward pole, dipping plane.
        assert!(pole.z > 0.0);
    }

    #[test]
    fn rejects_out_of_range_inclinations() {
        assert!(line_to_vector(10.0, -0.1).is_err());
        assert!(line_to_vector(10.0, 90.1).is_err());
        assert!(plane_to_pole(10.0, 100.0).is_err());
        assert!(plane_to_pole(f64::NAN, 30.0).is_err());
    }

    #[test]
    fn rejects_degenerate_vectors() {
        assert!(vector_to_line(Vector3::zeros()).is_err());
        assert!(vector_to_line(Vector3::new(f64::NAN, 0.0, 0.0)).is_err());
        assert!(pole_to_plane(Vector3::zeros()).is_err());
    }

    proptest! {
        #[test]
        fn line_round_trip(trend in 0.0..360.0f64, plunge in 0.0..89.99f64) {
            let v = line_to_vector(trend, plunge).unwrap();
            prop_assert!((v.norm() - 1.0).abs() < 1e-9);
            let (t, p) = vector_to_line(v).unwrap();
            prop_assert!(angular_diff(t, trend) < 1e-6);
            prop_assert!((p - plunge).abs() < 1e-6);
        }

        #[test]
        fn plane_round_trip(strike in 0.0..360.0f64, dip in 0.01..90.0f64) {
            let pole = plane_to_pole(strike, dip).unwrap();
            prop_assert!((pole.norm() - 1.0).abs() < 1e-9);
            let (s, d) = pole_to_plane(pole).unwrap();
            prop_assert!(angular_diff(s, strike) < 1e-6);
            prop_assert!((d - dip).abs() < 1e-6);
        }

        #[test]
        fn strike_stays_in_range(dip_dir in -720.0..720.0f64) {
            let s = dip_direction_to_strike(dip_dir).unwrap();
            prop_assert!((0.0..360.0).contains(&s));
        }
    }
}
