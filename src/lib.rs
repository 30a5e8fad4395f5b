pub mod constants;
pub mod kepler;
pub mod observations;
pub mod orbit_determination;
pub mod orbit_type;
pub mod propagation;
pub mod ref_system;
pub mod satod_errors;
pub mod time;
pub mod tle;
pub mod velocity;

pub use orbit_determination::{determine_history, ODParams, OrbitalElementHistory};
pub use orbit_type::classical_element::{ClassicalOrbitalElements, DegeneracyPolicy};
pub use propagation::TwoBodyPropagator;
pub use satod_errors::SatodError;
