//! # Velocity from position samples
//!
//! Finite-difference velocity estimation over a time-ordered position series. Two
//! schemes are available and are **not** interchangeable:
//!
//! * [`VelocityScheme::Central`] – [`estimate_velocity`]: central differences on the
//!   interior, one-sided differences on both endpoints; one velocity per sample.
//! * [`VelocityScheme::Backward`] – [`finite_difference`] of two consecutive samples,
//!   used by the streaming orbit determination.
//!
//! Every difference uses the local `Δt`, so non-uniform sampling is fine. Timestamps must
//! be strictly increasing: duplicates and reversals are rejected.
use itertools::Itertools;
use nalgebra::Vector3;

use crate::{constants::Second, satod_errors::SatodError};

/// Finite-difference scheme used to pair each position with a velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocityScheme {
    /// `(p_i − p_{i−1}) / (t_i − t_{i−1})`, paired with `p_{i−1}`.
    #[default]
    Backward,
    /// Central differences over the whole series, paired with `p_i`.
    Central,
}

/// Reject any timestamp sequence that is not strictly increasing.
///
/// Errors
/// ----------
/// * [`SatodError::NonIncreasingTimestamps`] naming the first offending index. `NaN`
///   timestamps are rejected as well.
pub fn check_strictly_increasing(times: &[Second]) -> Result<(), SatodError> {
    match times
        .iter()
        .tuple_windows()
        .position(|(prev, next)| !(next > prev))
    {
        Some(k) => Err(SatodError::NonIncreasingTimestamps {
            index: k + 1,
            previous: times[k],
            current: times[k + 1],
        }),
        None => Ok(()),
    }
}

/// Secant velocity between two samples, `(p₁ − p₀) / Δt`.
///
/// Backward difference for consecutive samples, central difference when the two samples
/// straddle the epoch of interest.
#[inline]
pub fn finite_difference(
    previous: &Vector3<f64>,
    current: &Vector3<f64>,
    dt: Second,
) -> Vector3<f64> {
    (current - previous) / dt
}

/// Estimate one velocity per sample with central differences.
///
/// ```text
/// v_0     = (p_1 − p_0)         / (t_1 − t_0)
/// v_i     = (p_{i+1} − p_{i−1}) / (t_{i+1} − t_{i−1})     1 ≤ i ≤ N−2
/// v_{N−1} = (p_{N−1} − p_{N−2}) / (t_{N−1} − t_{N−2})
/// ```
///
/// Arguments
/// -----------------
/// * `positions` – time-ordered positions.
/// * `times` – matching timestamps in seconds, strictly increasing.
///
/// Return
/// ----------
/// * A velocity for every input position, in position units per second.
///
/// Errors
/// ----------
/// * [`SatodError::LengthMismatch`] if the slices differ in length.
/// * [`SatodError::InsufficientSamples`] if fewer than two samples are given.
/// * [`SatodError::NonIncreasingTimestamps`] on duplicate or unordered timestamps.
pub fn estimate_velocity(
    positions: &[Vector3<f64>],
    times: &[Second],
) -> Result<Vec<Vector3<f64>>, SatodError> {
    if positions.len() != times.len() {
        return Err(SatodError::LengthMismatch {
            positions: positions.len(),
            times: times.len(),
        });
    }

    let n = positions.len();
    if n < 2 {
        return Err(SatodError::InsufficientSamples {
            required: 2,
            found: n,
        });
    }
    check_strictly_increasing(times)?;

    let mut velocities = Vec::with_capacity(n);
    velocities.push(finite_difference(
        &positions[0],
        &positions[1],
        times[1] - times[0],
    ));

    velocities.extend(
        positions
            .iter()
            .zip(times)
            .tuple_windows()
            .map(|((p_prev, t_prev), _, (p_next, t_next))| {
                finite_difference(p_prev, p_next, t_next - t_prev)
            }),
    );

    velocities.push(finite_difference(
        &positions[n - 2],
        &positions[n - 1],
        times[n - 1] - times[n - 2],
    ));

    Ok(velocities)
}
