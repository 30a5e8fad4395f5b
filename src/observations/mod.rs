//! # Position observations
//!
//! [`PositionSample`] is the input record of orbit determination: a timestamp in seconds
//! and a Cartesian position. A sequence of samples must share one frame and one length
//! unit and be sorted by strictly increasing timestamp.
//!
//! Sub-modules load and organise raw GPS records before they reach the numeric core:
//!
//! - [`gmat_reader`](crate::observations::gmat_reader) – GMAT `.gmd` GPS measurement files.
//! - [`chunking`](crate::observations::chunking) – per-day / per-chunk binning and
//!   nearest-pair selection.
use nalgebra::Vector3;

use crate::constants::Second;

pub mod chunking;
pub mod gmat_reader;

/// A time-stamped Cartesian position.
///
/// # Fields
///
/// * `time` - Timestamp in seconds (any origin, consistent across a sequence)
/// * `position` - Position vector, Earth-fixed or inertial depending on the context
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub time: Second,
    pub position: Vector3<f64>,
}

impl PositionSample {
    pub fn new(time: Second, position: Vector3<f64>) -> Self {
        PositionSample { time, position }
    }
}

/// Split a sample sequence into parallel timestamp and position vectors.
pub fn split_samples(samples: &[PositionSample]) -> (Vec<Second>, Vec<Vector3<f64>>) {
    samples.iter().map(|s| (s.time, s.position)).unzip()
}
