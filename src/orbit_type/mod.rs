//! # Orbital element representations
//!
//! - [`mean_element`](crate::orbit_type::mean_element) – Mean elements of a two-line element set,
//!   the input of [`TwoBodyPropagator`](crate::propagation::TwoBodyPropagator).
//! - [`classical_element`](crate::orbit_type::classical_element) – Osculating classical elements
//!   `(a, e, i, Ω, ω, ν)` extracted from a position/velocity pair.
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use nalgebra::Vector3;
//! use satod::constants::MU_EARTH;
//! use satod::orbit_type::classical_element::{ClassicalOrbitalElements, DegeneracyPolicy};
//!
//! let r = Vector3::new(6524.834, 6862.875, 6448.296);
//! let v = Vector3::new(4.901327, 5.533756, -1.976341);
//!
//! let elems =
//!     ClassicalOrbitalElements::from_state(&r, &v, MU_EARTH, DegeneracyPolicy::default())
//!         .unwrap();
//! println!("{elems}");
//! ```

/// Classical orbital elements and the state-vector extractor.
pub mod classical_element;

/// Mean orbital elements from two-line element sets.
pub mod mean_element;
