//! # Mean orbital elements
//!
//! [`MeanElementSet`] carries the mean elements of a two-line element set, in the units
//! the TLE format uses (degrees and revolutions per day). It is produced by
//! [`crate::tle`] and consumed by [`crate::propagation::TwoBodyPropagator`].
use std::fmt;

use hifitime::Epoch;

use crate::{
    constants::{Degree, Kilometer, Second, DPI, SECONDS_PER_DAY},
    satod_errors::SatodError,
};

/// Mean orbital elements at a reference epoch.
///
/// Units
/// -----
/// * `epoch`: UTC epoch of the element set.
/// * `inclination`, `raan`, `argument_of_perigee`, `mean_anomaly`: degrees.
/// * `eccentricity`: unitless, in `[0, 1)`.
/// * `mean_motion`: revolutions per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElementSet {
    pub epoch: Epoch,
    pub inclination: Degree,
    pub eccentricity: f64,
    pub raan: Degree,
    pub argument_of_perigee: Degree,
    pub mean_anomaly: Degree,
    pub mean_motion: f64,
}

impl MeanElementSet {
    /// Check that the set can be propagated: finite values, `mean_motion > 0`
    /// and `0 ≤ e < 1`.
    pub fn validate(&self) -> Result<(), SatodError> {
        if !(self.mean_motion.is_finite() && self.mean_motion > 0.0) {
            return Err(SatodError::InvalidMeanElements(format!(
                "mean motion must be > 0 rev/day, got {}",
                self.mean_motion
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(SatodError::InvalidMeanElements(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if !self.mean_anomaly.is_finite() {
            return Err(SatodError::InvalidMeanElements(
                "mean anomaly must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Mean motion converted from rev/day to rad/s.
    pub fn mean_motion_rad_per_sec(&self) -> f64 {
        self.mean_motion * DPI / SECONDS_PER_DAY
    }

    /// Semi-major axis from Kepler's third law, `a = (μ / n²)^(1/3)`.
    pub fn semi_major_axis(&self, mu: f64) -> Kilometer {
        let n = self.mean_motion_rad_per_sec();
        (mu / (n * n)).cbrt()
    }

    /// Orbital period in seconds.
    pub fn period(&self) -> Second {
        SECONDS_PER_DAY / self.mean_motion
    }
}

impl fmt::Display for MeanElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean Elements @ epoch: {}", self.epoch)?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  i   (inclination)           = {:.4}°", self.inclination)?;
        writeln!(f, "  e   (eccentricity)          = {:.7}", self.eccentricity)?;
        writeln!(f, "  Ω   (RAAN)                  = {:.4}°", self.raan)?;
        writeln!(
            f,
            "  ω   (argument of perigee)   = {:.4}°",
            self.argument_of_perigee
        )?;
        writeln!(f, "  M   (mean anomaly)          = {:.4}°", self.mean_anomaly)?;
        writeln!(
            f,
            "  n   (mean motion)           = {:.8} rev/day",
            self.mean_motion
        )
    }
}
