//! # Orbit determination from position time series
//!
//! Turns an ordered sequence of Earth-fixed [`PositionSample`]s into an
//! [`OrbitalElementHistory`]:
//!
//! 1. every sample is rotated into the inertial frame with a sidereal angle advancing
//!    linearly from [`ODParams::gst_start`] (see [`crate::ref_system`]),
//! 2. a velocity is paired with each inertial position (see [`crate::velocity`]),
//! 3. the classical elements of every `(position, velocity)` pair are extracted with
//!    [`ClassicalOrbitalElements::from_state`].
//!
//! With the default [`VelocityScheme::Backward`] the entry tagged `t_i` is built from the
//! position at `i − 1` and the velocity `(p_i − p_{i−1}) / (t_i − t_{i−1})`, so `N`
//! samples give `N − 1` entries and the first sample is never emitted.
//! [`VelocityScheme::Central`] estimates one velocity per sample over the whole series and
//! gives `N` entries, each built from its own sample.
//!
//! ## Configuration
//!
//! All knobs live in [`ODParams`], built either with [`ODParams::default`] or with the
//! validating [`ODParamsBuilder`]:
//!
//! ```rust,no_run
//! use satod::orbit_determination::ODParams;
//! use satod::velocity::VelocityScheme;
//!
//! let params = ODParams::builder()
//!     .gst_start(30.0)
//!     .velocity_scheme(VelocityScheme::Central)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## See also
//! * [`history_csv`] – CSV export of a history.
use std::cmp::Ordering::Greater;
use std::fmt;

use itertools::Itertools;
use nalgebra::Vector3;

use crate::{
    constants::{Degree, Second, MU_EARTH},
    kepler::{KeplerParams, KEPLER_MAX_ITER, KEPLER_TOLERANCE},
    observations::{split_samples, PositionSample},
    orbit_type::classical_element::{ClassicalOrbitalElements, DegeneracyPolicy},
    ref_system::{ecef_to_eci_batch, sidereal_angles},
    satod_errors::SatodError,
    velocity::{check_strictly_increasing, finite_difference, estimate_velocity, VelocityScheme},
};

pub mod history_csv;

/// One entry of an element history: the elements tagged with a sample timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    pub time: Second,
    pub elements: ClassicalOrbitalElements,
}

/// Time-ordered sequence of osculating elements.
pub type OrbitalElementHistory = Vec<HistoryEntry>;

/// Configuration of the orbit determination and of the shared two-body model.
///
/// Fields
/// -----------------
/// * `mu` – gravitational parameter (km³/s²).
/// * `kepler_tolerance` – Kepler solver threshold on `|ΔE|` (radians).
/// * `kepler_max_iter` – Kepler solver iteration budget.
/// * `gst_start` – sidereal angle at the first sample (degrees).
/// * `velocity_scheme` – pairing of positions and velocities.
/// * `degeneracy_policy` – handling of equatorial / circular orbits.
///
/// Defaults
/// -----------------
/// * `mu`: 398600.4418 km³/s²
/// * `kepler_tolerance`: 1e-12
/// * `kepler_max_iter`: 1000
/// * `gst_start`: 0°
/// * `velocity_scheme`: [`VelocityScheme::Backward`]
/// * `degeneracy_policy`: [`DegeneracyPolicy::ZeroConvention`]
#[derive(Debug, Clone, PartialEq)]
pub struct ODParams {
    pub mu: f64,
    pub kepler_tolerance: f64,
    pub kepler_max_iter: usize,
    pub gst_start: Degree,
    pub velocity_scheme: VelocityScheme,
    pub degeneracy_policy: DegeneracyPolicy,
}

impl ODParams {
    /// Equivalent to [`ODParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a validating [`ODParamsBuilder`] from the default values.
    pub fn builder() -> ODParamsBuilder {
        ODParamsBuilder::new()
    }

    /// Kepler solver controls carried by these parameters.
    pub fn kepler_params(&self) -> KeplerParams {
        KeplerParams {
            tolerance: self.kepler_tolerance,
            max_iter: self.kepler_max_iter,
        }
    }
}

impl Default for ODParams {
    fn default() -> Self {
        ODParams {
            mu: MU_EARTH,
            kepler_tolerance: KEPLER_TOLERANCE,
            kepler_max_iter: KEPLER_MAX_ITER,
            gst_start: 0.0,
            velocity_scheme: VelocityScheme::default(),
            degeneracy_policy: DegeneracyPolicy::default(),
        }
    }
}

/// Builder for [`ODParams`], with validation.
#[derive(Debug, Clone)]
pub struct ODParamsBuilder {
    params: ODParams,
}

impl Default for ODParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ODParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ODParams::default(),
        }
    }

    pub fn mu(mut self, v: f64) -> Self {
        self.params.mu = v;
        self
    }

    pub fn kepler_tolerance(mut self, v: f64) -> Self {
        self.params.kepler_tolerance = v;
        self
    }

    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.kepler_max_iter = v;
        self
    }

    pub fn gst_start(mut self, v: Degree) -> Self {
        self.params.gst_start = v;
        self
    }

    pub fn velocity_scheme(mut self, v: VelocityScheme) -> Self {
        self.params.velocity_scheme = v;
        self
    }

    pub fn degeneracy_policy(mut self, v: DegeneracyPolicy) -> Self {
        self.params.degeneracy_policy = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `mu > 0`
    /// * `kepler_tolerance > 0`
    /// * `kepler_max_iter ≥ 1`
    /// * `gst_start` finite
    ///
    /// Errors
    /// -----------------
    /// * [`SatodError::InvalidODParameter`] naming the first rule that fails.
    pub fn build(self) -> Result<ODParams, SatodError> {
        let p = &self.params;

        if !Self::gt0(p.mu) {
            return Err(SatodError::InvalidODParameter("mu must be > 0".into()));
        }
        if !Self::gt0(p.kepler_tolerance) {
            return Err(SatodError::InvalidODParameter(
                "kepler_tolerance must be > 0".into(),
            ));
        }
        if p.kepler_max_iter == 0 {
            return Err(SatodError::InvalidODParameter(
                "kepler_max_iter must be >= 1".into(),
            ));
        }
        if !p.gst_start.is_finite() {
            return Err(SatodError::InvalidODParameter(
                "gst_start must be finite".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for ODParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbit Determination Parameters")?;
        writeln!(f, "------------------------------")?;
        writeln!(f, "  mu                = {} km³/s²", self.mu)?;
        writeln!(f, "  kepler_tolerance  = {:e} rad", self.kepler_tolerance)?;
        writeln!(f, "  kepler_max_iter   = {}", self.kepler_max_iter)?;
        writeln!(f, "  gst_start         = {:.6}°", self.gst_start)?;
        writeln!(f, "  velocity_scheme   = {:?}", self.velocity_scheme)?;
        write!(f, "  degeneracy_policy = {:?}", self.degeneracy_policy)
    }
}

/// Elements of the arc between two consecutive inertial positions.
///
/// The velocity is the backward difference `(p₁ − p₀) / Δt` and is paired with `p₀`.
pub fn elements_from_pair(
    previous: &Vector3<f64>,
    current: &Vector3<f64>,
    dt: Second,
    params: &ODParams,
) -> Result<ClassicalOrbitalElements, SatodError> {
    let velocity = finite_difference(previous, current, dt);
    ClassicalOrbitalElements::from_state(previous, &velocity, params.mu, params.degeneracy_policy)
}

/// Build the element history of an Earth-fixed position time series.
///
/// Arguments
/// -----------------
/// * `samples` – Earth-fixed samples, timestamps in seconds and strictly increasing.
/// * `params` – `mu`, starting sidereal angle, velocity scheme and degeneracy policy.
///
/// Return
/// ----------
/// * `N − 1` entries tagged with the timestamps of samples `1..N` under
///   [`VelocityScheme::Backward`]; `N` entries under [`VelocityScheme::Central`].
///
/// Errors
/// ----------
/// * [`SatodError::InsufficientSamples`] for fewer than two samples.
/// * [`SatodError::NonIncreasingTimestamps`] for duplicate or unordered timestamps.
/// * [`SatodError::DegenerateOrbit`] for a sample with zero angular momentum, or under
///   [`DegeneracyPolicy::Strict`] when Ω or ω is undefined.
pub fn determine_history(
    samples: &[PositionSample],
    params: &ODParams,
) -> Result<OrbitalElementHistory, SatodError> {
    if samples.len() < 2 {
        return Err(SatodError::InsufficientSamples {
            required: 2,
            found: samples.len(),
        });
    }

    let (times, ecef_positions) = split_samples(samples);
    check_strictly_increasing(&times)?;

    let angles = sidereal_angles(params.gst_start, &times);
    let positions = ecef_to_eci_batch(&ecef_positions, &angles)?;

    match params.velocity_scheme {
        VelocityScheme::Backward => times
            .iter()
            .zip(&positions)
            .tuple_windows()
            .map(|((t_prev, p_prev), (t_cur, p_cur))| {
                elements_from_pair(p_prev, p_cur, t_cur - t_prev, params).map(|elements| {
                    HistoryEntry {
                        time: *t_cur,
                        elements,
                    }
                })
            })
            .collect(),
        VelocityScheme::Central => {
            let velocities = estimate_velocity(&positions, &times)?;
            times
                .iter()
                .zip(positions.iter().zip(&velocities))
                .map(|(&time, (p, v))| {
                    ClassicalOrbitalElements::from_state(
                        p,
                        v,
                        params.mu,
                        params.degeneracy_policy,
                    )
                    .map(|elements| HistoryEntry { time, elements })
                })
                .collect()
        }
    }
}

#[cfg(test)]
pub(crate) mod orbit_determination_test {
    use super::*;
    use crate::{propagation::TwoBodyPropagator, ref_system::eci_to_ecef};
    use approx::assert_abs_diff_eq;

    pub(crate) fn reference_elements() -> ClassicalOrbitalElements {
        ClassicalOrbitalElements {
            semi_major_axis: 7000.0,
            eccentricity: 0.01,
            inclination: 51.6,
            raan: 30.0,
            argument_of_perigee: 40.0,
            true_anomaly: 0.0,
        }
    }

    /// Earth-fixed samples of a Keplerian orbit, starting at perigee.
    pub(crate) fn synthetic_samples(
        reference: &ClassicalOrbitalElements,
        times: &[Second],
        gst_start: Degree,
    ) -> Vec<PositionSample> {
        let a = reference.semi_major_axis;
        let n = (MU_EARTH / (a * a * a)).sqrt();
        let nu = TwoBodyPropagator::new(a, n, reference.eccentricity, 0.0)
            .true_anomaly(times)
            .unwrap();
        let angles = sidereal_angles(gst_start, times);

        times
            .iter()
            .zip(nu)
            .zip(angles)
            .map(|((&t, nu), theta)| {
                let elements = ClassicalOrbitalElements {
                    true_anomaly: nu.to_degrees(),
                    ..*reference
                };
                let (position, _) = elements.to_state(MU_EARTH);
                PositionSample::new(t, eci_to_ecef(&position, theta))
            })
            .collect()
    }

    #[test]
    fn test_default_params() {
        let params = ODParams::default();
        assert_eq!(params.mu, 398_600.441_8);
        assert_eq!(params.kepler_tolerance, 1e-12);
        assert_eq!(params.kepler_max_iter, 1000);
        assert_eq!(params.gst_start, 0.0);
        assert_eq!(params.velocity_scheme, VelocityScheme::Backward);
        assert_eq!(params.degeneracy_policy, DegeneracyPolicy::ZeroConvention);
        assert_eq!(ODParams::builder().build().unwrap(), params);
        assert_eq!(params.kepler_params(), KeplerParams::default());
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            ODParams::builder().mu(0.0).build(),
            Err(SatodError::InvalidODParameter(_))
        ));
        assert!(ODParams::builder().mu(f64::NAN).build().is_err());
        assert!(ODParams::builder().kepler_tolerance(-1e-9).build().is_err());
        assert!(ODParams::builder().kepler_max_iter(0).build().is_err());
        assert!(ODParams::builder().gst_start(f64::INFINITY).build().is_err());

        let params = ODParams::builder()
            .mu(4.9048695e3)
            .gst_start(120.0)
            .velocity_scheme(VelocityScheme::Central)
            .degeneracy_policy(DegeneracyPolicy::Strict)
            .build()
            .unwrap();
        assert_eq!(params.gst_start, 120.0);
        assert_eq!(params.velocity_scheme, VelocityScheme::Central);
    }

    #[test]
    fn test_backward_history_length_and_timestamps() {
        let times: Vec<f64> = (0..30).map(|k| 5.0 + k as f64 * 10.0).collect();
        let samples = synthetic_samples(&reference_elements(), &times, 0.0);

        let history = determine_history(&samples, &ODParams::default()).unwrap();
        assert_eq!(history.len(), samples.len() - 1);
        for (entry, sample) in history.iter().zip(&samples[1..]) {
            assert_eq!(entry.time, sample.time);
        }
    }

    #[test]
    fn test_backward_history_recovers_orbit_plane() {
        let reference = reference_elements();
        let times: Vec<f64> = (0..60).map(|k| k as f64 * 10.0).collect();
        let samples = synthetic_samples(&reference, &times, 30.0);

        let params = ODParams::builder().gst_start(30.0).build().unwrap();
        for entry in determine_history(&samples, &params).unwrap() {
            let el = entry.elements;
            assert_abs_diff_eq!(el.inclination, reference.inclination, epsilon = 1e-4);
            assert_abs_diff_eq!(el.raan, reference.raan, epsilon = 1e-4);
            assert_abs_diff_eq!(el.semi_major_axis, reference.semi_major_axis, epsilon = 5.0);
        }
    }

    #[test]
    fn test_central_history_accuracy() {
        let reference = reference_elements();
        let times: Vec<f64> = (0..120).map(|k| k as f64).collect();
        let samples = synthetic_samples(&reference, &times, 75.0);

        let params = ODParams::builder()
            .gst_start(75.0)
            .velocity_scheme(VelocityScheme::Central)
            .build()
            .unwrap();
        let history = determine_history(&samples, &params).unwrap();
        assert_eq!(history.len(), samples.len());
        assert_eq!(history[0].time, 0.0);

        // interior entries only: endpoints use one-sided differences
        for entry in &history[1..history.len() - 1] {
            let el = entry.elements;
            assert_abs_diff_eq!(el.semi_major_axis, reference.semi_major_axis, epsilon = 0.1);
            assert_abs_diff_eq!(el.eccentricity, reference.eccentricity, epsilon = 1e-4);
            assert_abs_diff_eq!(el.inclination, reference.inclination, epsilon = 1e-5);
            assert_abs_diff_eq!(el.raan, reference.raan, epsilon = 1e-5);
            assert_abs_diff_eq!(
                el.argument_of_perigee,
                reference.argument_of_perigee,
                epsilon = 0.05
            );
        }
    }

    #[test]
    fn test_two_samples() {
        let times = [0.0, 1.0];
        let samples = synthetic_samples(&reference_elements(), &times, 0.0);
        let history = determine_history(&samples, &ODParams::default()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].time, 1.0);
    }

    #[test]
    fn test_rejected_inputs() {
        let one = [PositionSample::new(0.0, Vector3::new(7000.0, 0.0, 0.0))];
        assert_eq!(
            determine_history(&one, &ODParams::default()).unwrap_err(),
            SatodError::InsufficientSamples {
                required: 2,
                found: 1
            }
        );
        assert!(determine_history(&[], &ODParams::default()).is_err());

        let mut samples = synthetic_samples(&reference_elements(), &[0.0, 10.0, 20.0], 0.0);
        samples[2].time = 10.0;
        assert!(matches!(
            determine_history(&samples, &ODParams::default()),
            Err(SatodError::NonIncreasingTimestamps { index: 2, .. })
        ));
    }

    #[test]
    fn test_radial_track_has_no_orbit() {
        // along the rotation axis, so the frame rotation leaves it radial
        let samples: Vec<_> = [0.0, 1.0, 2.0]
            .iter()
            .map(|&t: &f64| PositionSample::new(t, Vector3::new(0.0, 0.0, 7000.0 + 10.0 * t)))
            .collect();

        for scheme in [VelocityScheme::Backward, VelocityScheme::Central] {
            let params = ODParams::builder().velocity_scheme(scheme).build().unwrap();
            assert!(matches!(
                determine_history(&samples, &params),
                Err(SatodError::DegenerateOrbit(_))
            ));
        }
    }

    #[test]
    fn test_strict_policy_on_equatorial_circular_orbit() {
        let r = 7000.0;
        let n = (MU_EARTH / (r * r * r)).sqrt();
        let samples: Vec<_> = [0.0, 1.0, 2.0]
            .iter()
            .map(|&t: &f64| {
                PositionSample::new(t, Vector3::new(r * (n * t).cos(), r * (n * t).sin(), 0.0))
            })
            .collect();

        let history = determine_history(&samples, &ODParams::default()).unwrap();
        assert_eq!(history[0].elements.raan, 0.0);
        assert_eq!(history[0].elements.argument_of_perigee, 0.0);

        let strict = ODParams::builder()
            .degeneracy_policy(DegeneracyPolicy::Strict)
            .build()
            .unwrap();
        assert!(matches!(
            determine_history(&samples, &strict),
            Err(SatodError::DegenerateOrbit(_))
        ));
    }
}
