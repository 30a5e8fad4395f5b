//! # Earth-fixed ↔ inertial frame rotation
//!
//! Positions measured in the Earth-fixed frame are rotated into the inertial frame about
//! the Z axis by the sidereal angle θ:
//!
//! ```text
//!        ⎡  cos θ   sin θ   0 ⎤
//! R(θ) = ⎢ −sin θ   cos θ   0 ⎥ ,   r_inertial = R(θ) · r_fixed
//!        ⎣    0       0     1 ⎦
//! ```
//!
//! The sidereal angle of each sample advances linearly at 360° per 86 400 s from a
//! starting value; this is a short-arc approximation, not an Earth orientation model.
use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{Degree, Second, EARTH_ROTATION_DEG_PER_SEC},
    satod_errors::SatodError,
};

/// Sidereal angle at `time`, advancing linearly from `gst_start` at `time_start`.
pub fn sidereal_angle(gst_start: Degree, time_start: Second, time: Second) -> Degree {
    gst_start + EARTH_ROTATION_DEG_PER_SEC * (time - time_start)
}

/// Sidereal angle of every sample of a time series.
///
/// Each angle is computed from the cumulative elapsed time since the first sample,
/// never from the previous angle, so any sample can be evaluated independently.
pub fn sidereal_angles(gst_start: Degree, times: &[Second]) -> Vec<Degree> {
    match times.first() {
        Some(&t0) => times
            .iter()
            .map(|&t| sidereal_angle(gst_start, t0, t))
            .collect(),
        None => Vec::new(),
    }
}

/// Rotation taking Earth-fixed coordinates to inertial coordinates at sidereal angle θ.
///
/// This is the active rotation by `−θ` about Z, i.e. the matrix `R(θ)` of the module
/// documentation.
pub fn ecef_to_eci_rotation(sidereal_angle: Degree) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -sidereal_angle.to_radians())
}

/// Rotate a single Earth-fixed position into the inertial frame.
pub fn ecef_to_eci(position: &Vector3<f64>, sidereal_angle: Degree) -> Vector3<f64> {
    ecef_to_eci_rotation(sidereal_angle) * position
}

/// Rotate an inertial position back into the Earth-fixed frame.
pub fn eci_to_ecef(position: &Vector3<f64>, sidereal_angle: Degree) -> Vector3<f64> {
    ecef_to_eci_rotation(sidereal_angle).inverse() * position
}

/// Rotate a batch of Earth-fixed positions, each with its own sidereal angle.
///
/// Errors
/// ----------
/// * [`SatodError::LengthMismatch`] if the two slices differ in length.
pub fn ecef_to_eci_batch(
    positions: &[Vector3<f64>],
    sidereal_angles: &[Degree],
) -> Result<Vec<Vector3<f64>>, SatodError> {
    if positions.len() != sidereal_angles.len() {
        return Err(SatodError::LengthMismatch {
            positions: positions.len(),
            times: sidereal_angles.len(),
        });
    }

    Ok(positions
        .iter()
        .zip(sidereal_angles)
        .map(|(pos, &theta)| ecef_to_eci(pos, theta))
        .collect())
}
