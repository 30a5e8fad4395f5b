use thiserror::Error;

use crate::{observations::gmat_reader::ParseGmatError, tle::ParseTleError};

#[derive(Error, Debug)]
pub enum SatodError {
    #[error(
        "Kepler solver diverged (zero derivative or invalid eccentricity): M = {mean_anomaly}, e = {eccentricity}"
    )]
    KeplerDivergence { mean_anomaly: f64, eccentricity: f64 },

    #[error("Kepler solver did not converge after {max_iter} iterations (last max |ΔE| = {max_step:e})")]
    KeplerConvergence { max_iter: usize, max_step: f64 },

    #[error("Not enough samples: at least {required} required, {found} given")]
    InsufficientSamples { required: usize, found: usize },

    #[error("Degenerate orbit: {0}")]
    DegenerateOrbit(String),

    #[error(
        "Timestamps must be strictly increasing: t[{index}] = {current} follows {previous}"
    )]
    NonIncreasingTimestamps {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Length mismatch: {positions} positions for {times} timestamps")]
    LengthMismatch { positions: usize, times: usize },

    #[error("Invalid mean element set: {0}")]
    InvalidMeanElements(String),

    #[error("Invalid orbit determination parameter: {0}")]
    InvalidODParameter(String),

    #[error("Chunk length must be a finite number of hours > 0, got {0}")]
    InvalidChunkLength(f64),

    #[error("Error during TLE parsing: {0}")]
    TleParsing(ParseTleError),

    #[error("Error during GMAT measurement parsing: {0}")]
    GmatParsing(ParseGmatError),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl From<ParseTleError> for SatodError {
    fn from(err: ParseTleError) -> Self {
        SatodError::TleParsing(err)
    }
}

impl From<ParseGmatError> for SatodError {
    fn from(err: ParseGmatError) -> Self {
        SatodError::GmatParsing(err)
    }
}

impl PartialEq for SatodError {
    fn eq(&self, other: &Self) -> bool {
        use SatodError::*;
        match (self, other) {
            (
                KeplerDivergence {
                    mean_anomaly: m1,
                    eccentricity: e1,
                },
                KeplerDivergence {
                    mean_anomaly: m2,
                    eccentricity: e2,
                },
            ) => m1 == m2 && e1 == e2,
            (
                KeplerConvergence { max_iter: a, .. },
                KeplerConvergence { max_iter: b, .. },
            ) => a == b,
            (
                InsufficientSamples {
                    required: r1,
                    found: f1,
                },
                InsufficientSamples {
                    required: r2,
                    found: f2,
                },
            ) => r1 == r2 && f1 == f2,
            (DegenerateOrbit(a), DegenerateOrbit(b)) => a == b,
            (
                NonIncreasingTimestamps { index: a, .. },
                NonIncreasingTimestamps { index: b, .. },
            ) => a == b,
            (
                LengthMismatch {
                    positions: p1,
                    times: t1,
                },
                LengthMismatch {
                    positions: p2,
                    times: t2,
                },
            ) => p1 == p2 && t1 == t2,
            (InvalidMeanElements(a), InvalidMeanElements(b)) => a == b,
            (InvalidODParameter(a), InvalidODParameter(b)) => a == b,
            (InvalidChunkLength(a), InvalidChunkLength(b)) => a == b,
            (TleParsing(a), TleParsing(b)) => a == b,
            (GmatParsing(a), GmatParsing(b)) => a == b,

            // Not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
