//! # Kepler equation solver
//!
//! Batched Newton–Raphson solution of the elliptic Kepler equation
//!
//! ```text
//! E − e·sin(E) = M
//! ```
//!
//! for a vector of mean anomalies sharing one eccentricity. Every element advances one
//! Newton step per loop and the loop stops only when **all** steps are below the
//! tolerance, so the whole batch either converges or fails together.
//!
//! ## Failure modes
//!
//! * [`SatodError::KeplerDivergence`] – a zero derivative `1 − e·cos(E)` was met, or the
//!   eccentricity is outside `[0, 1)`.
//! * [`SatodError::KeplerConvergence`] – the iteration budget was exhausted.
//!
//! No partial result is ever returned.
//!
//! Newton runs on the principal value `M mod 2π` and the whole turns are added back to
//! the result, so arbitrarily large unwrapped anomalies are solved to the same accuracy.
use crate::{
    constants::{Radian, DPI},
    satod_errors::SatodError,
};

/// Default convergence tolerance on the Newton step (radians).
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Default maximum number of Newton iterations.
pub const KEPLER_MAX_ITER: usize = 1000;

/// Numerical controls of the Kepler solver.
///
/// Fields
/// -----------------
/// * `tolerance` – threshold on `|ΔE|` (radians) that every element must satisfy.
/// * `max_iter` – iteration budget for the whole batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerParams {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Default for KeplerParams {
    fn default() -> Self {
        KeplerParams {
            tolerance: KEPLER_TOLERANCE,
            max_iter: KEPLER_MAX_ITER,
        }
    }
}

/// Return the principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Solve Kepler's equation for a batch of mean anomalies.
///
/// Each mean anomaly is reduced to `M_red = M mod 2π`. The iteration is seeded with
/// `E₀ = M_red` and applies `E ← E − (E − e·sin E − M_red) / (1 − e·cos E)` to every
/// element until `max |ΔE| < tolerance`; the result is `M + (E − M_red)`.
///
/// Arguments
/// -----------------
/// * `mean_anomalies` – mean anomalies in radians (no reduction to `[0, 2π)` required).
/// * `eccentricity` – shared eccentricity, `0 ≤ e < 1`.
/// * `params` – tolerance and iteration budget.
///
/// Return
/// ----------
/// * The eccentric anomalies, in the same order as the input. An empty input yields an
///   empty output.
///
/// Errors
/// ----------
/// * [`SatodError::KeplerDivergence`] if `e` is not in `[0, 1)` or a derivative vanishes.
/// * [`SatodError::KeplerConvergence`] if the batch does not converge within `max_iter`.
pub fn solve_kepler_batch(
    mean_anomalies: &[Radian],
    eccentricity: f64,
    params: &KeplerParams,
) -> Result<Vec<Radian>, SatodError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(SatodError::KeplerDivergence {
            mean_anomaly: mean_anomalies.first().copied().unwrap_or(f64::NAN),
            eccentricity,
        });
    }

    if mean_anomalies.is_empty() {
        return Ok(Vec::new());
    }

    let reduced: Vec<Radian> = mean_anomalies.iter().map(|m| principal_angle(*m)).collect();
    let mut ecc_anomaly = reduced.clone();

    let mut steps = vec![0.0; ecc_anomaly.len()];
    let mut max_step = f64::INFINITY;

    for _ in 0..params.max_iter {
        // Derivatives are all checked before any element is updated.
        for (((step, &ea), &m_red), &m) in steps
            .iter_mut()
            .zip(&ecc_anomaly)
            .zip(&reduced)
            .zip(mean_anomalies)
        {
            let f = ea - eccentricity * ea.sin() - m_red;
            let f_prime = 1.0 - eccentricity * ea.cos();
            if f_prime == 0.0 {
                return Err(SatodError::KeplerDivergence {
                    mean_anomaly: m,
                    eccentricity,
                });
            }
            *step = f / f_prime;
        }

        let mut converged = true;
        max_step = 0.0;
        for (ea, step) in ecc_anomaly.iter_mut().zip(&steps) {
            *ea -= step;
            let abs_step = step.abs();
            converged &= abs_step < params.tolerance;
            if abs_step.is_nan() || abs_step > max_step {
                max_step = abs_step;
            }
        }

        if converged {
            return Ok(ecc_anomaly
                .iter()
                .zip(&reduced)
                .zip(mean_anomalies)
                .map(|((ea, m_red), m)| m + (ea - m_red))
                .collect());
        }
    }

    Err(SatodError::KeplerConvergence {
        max_iter: params.max_iter,
        max_step,
    })
}

/// Solve Kepler's equation for a single mean anomaly.
///
/// Thin wrapper over [`solve_kepler_batch`] with a batch of one.
pub fn solve_kepler(
    mean_anomaly: Radian,
    eccentricity: f64,
    params: &KeplerParams,
) -> Result<Radian, SatodError> {
    let ecc_anomaly = solve_kepler_batch(&[mean_anomaly], eccentricity, params)?;
    Ok(ecc_anomaly[0])
}

/// True anomaly from the eccentric anomaly, `ν = atan2(√(1−e²)·sin E, cos E − e)`.
///
/// The result lies in `(−π, π]`.
pub fn true_anomaly_from_eccentric(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity)
}
