#![allow(dead_code)]

use approx::assert_relative_eq;
use satod::{
    constants::{Degree, Second},
    observations::PositionSample,
    orbit_type::classical_element::ClassicalOrbitalElements,
    propagation::TwoBodyPropagator,
    ref_system::{eci_to_ecef, sidereal_angle},
};

pub fn assert_elements_close(
    actual: &ClassicalOrbitalElements,
    expected: &ClassicalOrbitalElements,
    epsilon: f64,
) {
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.eccentricity,
        expected.eccentricity,
        epsilon = epsilon
    );
    assert_relative_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_relative_eq!(actual.raan, expected.raan, epsilon = epsilon);
    assert_relative_eq!(
        actual.argument_of_perigee,
        expected.argument_of_perigee,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.true_anomaly,
        expected.true_anomaly,
        epsilon = epsilon
    );
}

/// Inertial positions of `elements` along `propagator`, rotated to the Earth-fixed frame.
///
/// `elements.true_anomaly` is ignored; the propagator provides it at every time.
pub fn earth_fixed_samples(
    propagator: &TwoBodyPropagator,
    elements: &ClassicalOrbitalElements,
    mu: f64,
    times: &[Second],
    gst_start: Degree,
) -> Vec<PositionSample> {
    let nu = propagator.true_anomaly(times).unwrap();
    times
        .iter()
        .zip(nu)
        .map(|(&t, nu)| {
            let (position, _) = ClassicalOrbitalElements {
                true_anomaly: nu.to_degrees(),
                ..*elements
            }
            .to_state(mu);
            let theta = sidereal_angle(gst_start, times[0], t);
            PositionSample::new(t, eci_to_ecef(&position, theta))
        })
        .collect()
}
