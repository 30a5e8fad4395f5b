//! # Two-body propagation
//!
//! Closed-form propagation of a fixed set of mean elements. For every time offset `t`:
//!
//! ```text
//! M(t) = M₀ + n·t                     (unwrapped)
//! E(t) = solve Kepler(M(t), e)
//! ν(t) = atan2(√(1−e²)·sin E, cos E − e)
//! r(t) = a(1−e²) / (1 + e·cos ν)
//! x(t) = r·cos ν,  y(t) = r·sin ν
//! ```
//!
//! The trajectory stays in the **perifocal plane**; no inclination / node / perigee
//! rotation is applied here.
//!
//! The whole time grid is solved as one Kepler batch, so a single non-convergent
//! epoch aborts the call.
use crate::{
    constants::{Kilometer, Radian, Second},
    kepler::{solve_kepler_batch, true_anomaly_from_eccentric, KeplerParams},
    orbit_determination::ODParams,
    orbit_type::mean_element::MeanElementSet,
    satod_errors::SatodError,
};

/// Planar trajectory sampled on a time grid, as parallel arrays.
///
/// All vectors have the length of the input time grid and follow its order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarTrajectory {
    pub time: Vec<Second>,
    pub mean_anomaly: Vec<Radian>,
    pub true_anomaly: Vec<Radian>,
    pub radius: Vec<Kilometer>,
    pub x: Vec<Kilometer>,
    pub y: Vec<Kilometer>,
}

impl PlanarTrajectory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Two-body propagator for one set of mean elements.
///
/// Fields
/// -----------------
/// * `semi_major_axis` – km.
/// * `mean_motion` – rad/s.
/// * `eccentricity` – `0 ≤ e < 1`.
/// * `initial_mean_anomaly` – radians at `t = 0`.
/// * `kepler` – solver controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBodyPropagator {
    pub semi_major_axis: Kilometer,
    pub mean_motion: f64,
    pub eccentricity: f64,
    pub initial_mean_anomaly: Radian,
    pub kepler: KeplerParams,
}

impl TwoBodyPropagator {
    pub fn new(
        semi_major_axis: Kilometer,
        mean_motion: f64,
        eccentricity: f64,
        initial_mean_anomaly: Radian,
    ) -> Self {
        TwoBodyPropagator {
            semi_major_axis,
            mean_motion,
            eccentricity,
            initial_mean_anomaly,
            kepler: KeplerParams::default(),
        }
    }

    /// Build a propagator from a TLE mean-element set.
    ///
    /// The mean motion is converted from rev/day to rad/s and the semi-major axis is
    /// derived from it with Kepler's third law using `mu`. Time offsets passed to the
    /// propagation methods are then seconds since the element-set epoch.
    ///
    /// Errors
    /// ----------
    /// * [`SatodError::InvalidMeanElements`] if the set fails [`MeanElementSet::validate`].
    pub fn from_mean_elements(elements: &MeanElementSet, mu: f64) -> Result<Self, SatodError> {
        elements.validate()?;
        Ok(TwoBodyPropagator::new(
            elements.semi_major_axis(mu),
            elements.mean_motion_rad_per_sec(),
            elements.eccentricity,
            elements.mean_anomaly.to_radians(),
        ))
    }

    /// Build a propagator from a TLE mean-element set with the gravitational parameter
    /// and Kepler solver controls of `params`.
    ///
    /// Errors
    /// ----------
    /// * [`SatodError::InvalidMeanElements`] if the set fails [`MeanElementSet::validate`].
    pub fn from_mean_elements_with_params(
        elements: &MeanElementSet,
        params: &ODParams,
    ) -> Result<Self, SatodError> {
        Ok(TwoBodyPropagator::from_mean_elements(elements, params.mu)?
            .with_kepler_params(params.kepler_params()))
    }

    /// Replace the Kepler solver controls.
    pub fn with_kepler_params(mut self, kepler: KeplerParams) -> Self {
        self.kepler = kepler;
        self
    }

    /// Orbital period in seconds, `2π / n`.
    pub fn period(&self) -> Second {
        crate::constants::DPI / self.mean_motion
    }

    /// Mean anomaly at each time offset, without modulo reduction.
    pub fn mean_anomaly(&self, time: &[Second]) -> Vec<Radian> {
        time.iter()
            .map(|t| self.initial_mean_anomaly + self.mean_motion * t)
            .collect()
    }

    /// True anomaly at each time offset, in `(−π, π]`.
    pub fn true_anomaly(&self, time: &[Second]) -> Result<Vec<Radian>, SatodError> {
        let ecc_anomaly =
            solve_kepler_batch(&self.mean_anomaly(time), self.eccentricity, &self.kepler)?;
        Ok(ecc_anomaly
            .into_iter()
            .map(|ea| true_anomaly_from_eccentric(ea, self.eccentricity))
            .collect())
    }

    /// Orbital radius for a given true anomaly, `a(1−e²) / (1 + e·cos ν)`.
    pub fn radius_at(&self, true_anomaly: Radian) -> Kilometer {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
    }

    /// Orbital radius at each time offset.
    pub fn orbital_radius(&self, time: &[Second]) -> Result<Vec<Kilometer>, SatodError> {
        Ok(self
            .true_anomaly(time)?
            .into_iter()
            .map(|nu| self.radius_at(nu))
            .collect())
    }

    /// In-plane coordinates `(x, y)` at each time offset.
    pub fn plane_coordinates(
        &self,
        time: &[Second],
    ) -> Result<(Vec<Kilometer>, Vec<Kilometer>), SatodError> {
        let trajectory = self.propagate(time)?;
        Ok((trajectory.x, trajectory.y))
    }

    /// Propagate over a time grid and return every derived quantity.
    ///
    /// Arguments
    /// -----------------
    /// * `time` – offsets in seconds from the epoch of `initial_mean_anomaly`; any order.
    ///
    /// Return
    /// ----------
    /// * A [`PlanarTrajectory`] with one entry per time offset.
    ///
    /// Errors
    /// ----------
    /// * Kepler solver failures ([`SatodError::KeplerDivergence`],
    ///   [`SatodError::KeplerConvergence`]) abort the whole propagation.
    pub fn propagate(&self, time: &[Second]) -> Result<PlanarTrajectory, SatodError> {
        let mean_anomaly = self.mean_anomaly(time);
        let ecc_anomaly = solve_kepler_batch(&mean_anomaly, self.eccentricity, &self.kepler)?;

        let mut trajectory = PlanarTrajectory {
            time: time.to_vec(),
            mean_anomaly,
            ..Default::default()
        };

        for ea in ecc_anomaly {
            let nu = true_anomaly_from_eccentric(ea, self.eccentricity);
            let radius = self.radius_at(nu);
            let (sin_nu, cos_nu) = nu.sin_cos();
            trajectory.true_anomaly.push(nu);
            trajectory.radius.push(radius);
            trajectory.x.push(radius * cos_nu);
            trajectory.y.push(radius * sin_nu);
        }

        Ok(trajectory)
    }
}

#[cfg(test)]
mod propagation_test {
    use super::*;
    use crate::{
        constants::{DPI, MU_EARTH, SECONDS_PER_DAY},
        orbit_type::mean_element::mean_element_test::iss_like,
    };
    use approx::assert_abs_diff_eq;

    fn ninety_two_minute_orbit(eccentricity: f64) -> TwoBodyPropagator {
        let period = 92.0 * 60.0;
        let n = DPI / period;
        let a = (MU_EARTH / (n * n)).cbrt();
        TwoBodyPropagator::new(a, n, eccentricity, 0.0)
    }

    #[test]
    fn test_circular_radius_is_constant() {
        let prop = ninety_two_minute_orbit(0.0);
        let time: Vec<f64> = (0..200).map(|k| k as f64 * 37.0).collect();

        let radius = prop.orbital_radius(&time).unwrap();
        assert_eq!(radius.len(), time.len());
        for r in radius {
            assert_abs_diff_eq!(r, prop.semi_major_axis, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_periodicity() {
        let prop = ninety_two_minute_orbit(0.001);
        let period = prop.period();
        assert_abs_diff_eq!(period, 92.0 * 60.0, epsilon = 1e-9);

        let nu = prop.true_anomaly(&[0.0, period]).unwrap();
        assert_abs_diff_eq!(nu[0], nu[1], epsilon = 1e-9);
    }

    #[test]
    fn test_perigee_and_apogee() {
        let prop = TwoBodyPropagator::new(10_000.0, 1e-3, 0.2, 0.0);
        let half_period = prop.period() / 2.0;
        let traj = prop.propagate(&[0.0, half_period]).unwrap();

        assert_abs_diff_eq!(traj.radius[0], 8_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(traj.radius[1], 12_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(traj.x[0], 8_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(traj.y[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(traj.x[1], -12_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_anomaly_is_unwrapped() {
        let prop = TwoBodyPropagator::new(7000.0, 1e-3, 0.01, 1.0);
        let m = prop.mean_anomaly(&[0.0, 10_000.0]);
        assert_eq!(m, vec![1.0, 11.0]);
    }

    #[test]
    fn test_plane_coordinates_match_radius() {
        let prop = ninety_two_minute_orbit(0.05);
        let time: Vec<f64> = (0..50).map(|k| k as f64 * 60.0).collect();

        let (x, y) = prop.plane_coordinates(&time).unwrap();
        let radius = prop.orbital_radius(&time).unwrap();
        for ((x, y), r) in x.iter().zip(&y).zip(&radius) {
            assert_abs_diff_eq!(x.hypot(*y), *r, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_from_mean_elements() {
        let set = iss_like();
        let prop = TwoBodyPropagator::from_mean_elements(&set, MU_EARTH).unwrap();

        assert_abs_diff_eq!(
            prop.mean_motion,
            15.72125391 * DPI / SECONDS_PER_DAY,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(prop.initial_mean_anomaly, 325.0288_f64.to_radians());

        let traj = prop.propagate(&[0.0, 600.0, 1200.0]).unwrap();
        assert_eq!(traj.len(), 3);
        let perigee = prop.semi_major_axis * (1.0 - set.eccentricity);
        let apogee = prop.semi_major_axis * (1.0 + set.eccentricity);
        for r in &traj.radius {
            assert!(*r >= perigee - 1e-9 && *r <= apogee + 1e-9);
        }
    }

    #[test]
    fn test_one_year_out() {
        let a = 6_730.96;
        let prop = TwoBodyPropagator::new(a, (MU_EARTH / (a * a * a)).sqrt(), 0.1, 0.3);
        let time: Vec<f64> = (0..60)
            .map(|k| 365.0 * SECONDS_PER_DAY + k as f64 * 60.0)
            .collect();

        let traj = prop.propagate(&time).unwrap();
        assert_eq!(traj.len(), 60);
        for r in &traj.radius {
            assert!(*r >= 0.9 * a - 1e-6 && *r <= 1.1 * a + 1e-6);
        }

        // same phase as one whole number of periods earlier
        let revolutions = (time[0] / prop.period()).floor();
        let early = prop
            .propagate(&[time[0] - revolutions * prop.period()])
            .unwrap();
        assert_abs_diff_eq!(early.radius[0], traj.radius[0], epsilon = 1e-4);
    }

    #[test]
    fn test_params_reach_the_propagator() {
        let set = iss_like();
        let params = ODParams::builder().kepler_max_iter(1).build().unwrap();
        let prop = TwoBodyPropagator::from_mean_elements_with_params(&set, &params).unwrap();

        assert_eq!(prop.kepler, params.kepler_params());
        assert_eq!(prop.kepler.max_iter, 1);
        assert!(matches!(
            prop.propagate(&[0.0, 600.0]),
            Err(SatodError::KeplerConvergence { max_iter: 1, .. })
        ));

        let moon = ODParams::builder().mu(4_902.800_066).build().unwrap();
        let prop = TwoBodyPropagator::from_mean_elements_with_params(&set, &moon).unwrap();
        assert_abs_diff_eq!(
            prop.semi_major_axis,
            set.semi_major_axis(4_902.800_066),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_invalid_eccentricity_aborts() {
        let prop = TwoBodyPropagator::new(7000.0, 1e-3, 1.5, 0.0);
        assert!(matches!(
            prop.propagate(&[0.0, 1.0]),
            Err(SatodError::KeplerDivergence { .. })
        ));
    }
}
