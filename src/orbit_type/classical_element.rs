//! # Classical orbital elements
//!
//! This module defines [`ClassicalOrbitalElements`] and the **two-body vector method**
//! that extracts them from a single position/velocity pair.
//!
//! ## Elements
//!
//! 1. **a** – Semi-major axis (km), from vis-viva
//! 2. **e** – Eccentricity (unitless)
//! 3. **i** – Inclination (degrees, `[0, 180]`)
//! 4. **Ω** – Right ascension of the ascending node (degrees, `[0, 360)`)
//! 5. **ω** – Argument of perigee (degrees, `[0, 360)`)
//! 6. **ν** – True anomaly (degrees, `[0, 360)`)
//!
//! ## Degeneracies
//!
//! - **Equatorial orbits** (`|n| ≈ 0`): Ω is undefined and set to `0`.
//! - **Circular orbits** (`e ≈ 0`) and equatorial orbits: ω is undefined and set to `0`.
//!
//! Under [`DegeneracyPolicy::Strict`] both cases raise [`SatodError::DegenerateOrbit`]
//! instead. The thresholds are relative to `|h|` for the node vector and absolute
//! for the eccentricity, both [`DEGENERACY_EPS`].
//!
//! Open (parabolic or hyperbolic) trajectories are not special-cased: the vis-viva
//! semi-major axis is then negative or infinite.
use std::fmt;

use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{Degree, Kilometer, DEGENERACY_EPS},
    kepler::principal_angle,
    satod_errors::SatodError,
};

/// How the extractor treats equatorial and circular orbits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneracyPolicy {
    /// Undefined angles are reported as `0`.
    #[default]
    ZeroConvention,
    /// Undefined angles raise [`SatodError::DegenerateOrbit`].
    Strict,
}

/// Classical (osculating, two-body) orbital elements.
///
/// Units
/// -----
/// * `semi_major_axis`: same length unit as the input state (km by convention).
/// * `eccentricity`: unitless.
/// * `inclination`, `raan`, `argument_of_perigee`, `true_anomaly`: degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicalOrbitalElements {
    pub semi_major_axis: Kilometer,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub raan: Degree,
    pub argument_of_perigee: Degree,
    pub true_anomaly: Degree,
}

/// Radians → degrees in `[0, 360)`.
fn to_principal_degrees(angle: f64) -> Degree {
    let deg = principal_angle(angle).to_degrees();
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

impl ClassicalOrbitalElements {
    /// Extract the classical elements from a position/velocity pair.
    ///
    /// Algorithm
    /// -----------------
    /// * `h = r × v`, `i = acos(h_z / |h|)`
    /// * `n = ẑ × h`, `Ω = atan2(n_y, n_x)`
    /// * `e = (v × h)/μ − r/|r|`
    /// * `ω = atan2((n × e)·h/|h|, n·e)`
    /// * `ν = atan2((e × r)·h/|h|, e·r)`
    /// * `a = 1 / (2/|r| − |v|²/μ)`
    ///
    /// Arguments
    /// -----------------
    /// * `position` – inertial position.
    /// * `velocity` – inertial velocity, same length unit per second.
    /// * `mu` – gravitational parameter (length³/s²).
    /// * `policy` – handling of undefined Ω / ω.
    ///
    /// Return
    /// ----------
    /// * The elements.
    ///
    /// Errors
    /// ----------
    /// * [`SatodError::DegenerateOrbit`] for a rectilinear or non-finite state (`|h|` zero
    ///   or not finite), under either policy.
    /// * [`SatodError::DegenerateOrbit`] under the strict policy when Ω or ω is undefined.
    pub fn from_state(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        mu: f64,
        policy: DegeneracyPolicy,
    ) -> Result<Self, SatodError> {
        let r_norm = position.norm();

        let angular_momentum = position.cross(velocity);
        let h_norm = angular_momentum.norm();
        if !(h_norm > 0.0 && h_norm.is_finite()) {
            return Err(SatodError::DegenerateOrbit(format!(
                "no orbital plane, angular momentum |h| = {h_norm:e}"
            )));
        }
        let inclination = (angular_momentum.z / h_norm).clamp(-1.0, 1.0).acos();

        let node = Vector3::z().cross(&angular_momentum);
        let node_norm = node.norm();
        let equatorial = node_norm <= DEGENERACY_EPS * h_norm;

        let ecc_vector = velocity.cross(&angular_momentum) / mu - position / r_norm;
        let eccentricity = ecc_vector.norm();
        let circular = eccentricity < DEGENERACY_EPS;

        if policy == DegeneracyPolicy::Strict {
            if equatorial {
                return Err(SatodError::DegenerateOrbit(format!(
                    "equatorial orbit, ascending node undefined (|n| = {node_norm:e})"
                )));
            }
            if circular {
                return Err(SatodError::DegenerateOrbit(format!(
                    "circular orbit, argument of perigee undefined (e = {eccentricity:e})"
                )));
            }
        }

        let raan = if equatorial {
            0.0
        } else {
            node.y.atan2(node.x)
        };

        let argument_of_perigee = if equatorial || circular {
            0.0
        } else {
            (node.cross(&ecc_vector).dot(&angular_momentum) / h_norm).atan2(node.dot(&ecc_vector))
        };

        let true_anomaly = (ecc_vector.cross(position).dot(&angular_momentum) / h_norm)
            .atan2(ecc_vector.dot(position));

        let semi_major_axis = 1.0 / (2.0 / r_norm - velocity.norm_squared() / mu);

        Ok(ClassicalOrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination: inclination.to_degrees(),
            raan: to_principal_degrees(raan),
            argument_of_perigee: to_principal_degrees(argument_of_perigee),
            true_anomaly: to_principal_degrees(true_anomaly),
        })
    }

    /// Inertial position and velocity described by these elements.
    ///
    /// The state is built in the perifocal frame and rotated by the 3-1-3 sequence
    /// `Rz(Ω)·Rx(i)·Rz(ω)`. Valid for `0 ≤ e < 1` and `a > 0`.
    ///
    /// Return
    /// ----------
    /// * `(position, velocity)` in the length unit of `semi_major_axis` and per second.
    pub fn to_state(&self, mu: f64) -> (Vector3<f64>, Vector3<f64>) {
        let e = self.eccentricity;
        let p = self.semi_major_axis * (1.0 - e * e);
        let (sin_nu, cos_nu) = self.true_anomaly.to_radians().sin_cos();

        let radius = p / (1.0 + e * cos_nu);
        let position_pf = Vector3::new(radius * cos_nu, radius * sin_nu, 0.0);
        let velocity_pf = (mu / p).sqrt() * Vector3::new(-sin_nu, e + cos_nu, 0.0);

        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), self.raan.to_radians())
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.inclination.to_radians())
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.argument_of_perigee.to_radians());

        (rot * position_pf, rot * velocity_pf)
    }
}

impl fmt::Display for ClassicalOrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classical Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} km",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(f, "  i   (inclination)           = {:.6}°", self.inclination)?;
        writeln!(f, "  Ω   (RAAN)                  = {:.6}°", self.raan)?;
        writeln!(
            f,
            "  ω   (argument of perigee)   = {:.6}°",
            self.argument_of_perigee
        )?;
        writeln!(f, "  ν   (true anomaly)          = {:.6}°", self.true_anomaly)
    }
}
