//! # Two-line element set reader
//!
//! Parse **NORAD two-line element sets** into [`MeanElementSet`] values for the
//! two-body propagator.
//!
//! ## Field layout (zero-based, end-exclusive columns)
//! -----------------
//! Line 1:
//! * `18..32` – Epoch, `YYDDD.DDDDDDDD` (see [`tle_epoch_to_epoch`]).
//!
//! Line 2:
//! * `8..16`  – Inclination (degrees)
//! * `17..25` – Right ascension of the ascending node (degrees)
//! * `26..33` – Eccentricity, leading decimal point implied
//! * `34..42` – Argument of perigee (degrees)
//! * `43..51` – Mean anomaly (degrees)
//! * `52..63` – Mean motion (revolutions per day)
//!
//! Drag terms, checksums and catalog metadata are not read.
//!
//! ## Error Handling
//! -----------------
//! [`parse_tle`] reports the first failure as a [`ParseTleError`] wrapped into
//! [`SatodError::TleParsing`]. The text-level readers skip malformed sets with a
//! `warn!` log and keep going.
use std::ops::Range;

use camino::Utf8Path;
use log::{debug, warn};
use thiserror::Error;

use crate::{
    orbit_type::mean_element::MeanElementSet, satod_errors::SatodError, time::tle_epoch_to_epoch,
};

/// Line-level parsing errors for two-line element sets.
///
/// Variants
/// -----------------
/// * `TooShortLine` – The line does not reach the last column read; payload is the line number.
/// * `WrongLineNumber` – The line does not start with the expected `1` / `2`.
/// * `InvalidEpoch` – Failed to parse the epoch field; payload carries the offending slice.
/// * `InvalidField` – Failed to parse a line 2 field; payload carries the field name and slice.
#[derive(Error, Debug, PartialEq)]
pub enum ParseTleError {
    #[error("TLE line {0} is too short")]
    TooShortLine(u8),
    #[error("Expected TLE line {expected}, found: {found}")]
    WrongLineNumber { expected: u8, found: String },
    #[error("Invalid TLE epoch: {0}")]
    InvalidEpoch(String),
    #[error("Invalid TLE {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

const EPOCH: Range<usize> = 18..32;
const INCLINATION: Range<usize> = 8..16;
const RAAN: Range<usize> = 17..25;
const ECCENTRICITY: Range<usize> = 26..33;
const ARG_PERIGEE: Range<usize> = 34..42;
const MEAN_ANOMALY: Range<usize> = 43..51;
const MEAN_MOTION: Range<usize> = 52..63;

fn field<'a>(line: &'a str, range: Range<usize>, line_number: u8) -> Result<&'a str, ParseTleError> {
    line.get(range)
        .map(str::trim)
        .ok_or(ParseTleError::TooShortLine(line_number))
}

fn float_field(line: &str, range: Range<usize>, name: &'static str) -> Result<f64, ParseTleError> {
    let raw = field(line, range, 2)?;
    raw.parse::<f64>().map_err(|_| ParseTleError::InvalidField {
        field: name,
        value: raw.to_string(),
    })
}

fn check_line_number(line: &str, expected: u8) -> Result<(), ParseTleError> {
    let tag = if expected == 1 { "1 " } else { "2 " };
    if line.starts_with(tag) {
        Ok(())
    } else {
        Err(ParseTleError::WrongLineNumber {
            expected,
            found: line.chars().take(8).collect(),
        })
    }
}

/// Parse one two-line element set.
///
/// Arguments
/// -----------------
/// * `line1`, `line2` – the two element lines, without the optional name line.
///
/// Return
/// ----------
/// * The [`MeanElementSet`] of the pair, or [`SatodError::TleParsing`] on the first
///   malformed field.
pub fn parse_tle(line1: &str, line2: &str) -> Result<MeanElementSet, SatodError> {
    let line1 = line1.trim_end();
    let line2 = line2.trim_end();
    check_line_number(line1, 1)?;
    check_line_number(line2, 2)?;

    let raw_epoch = field(line1, EPOCH, 1)?;
    let epoch = raw_epoch
        .parse::<f64>()
        .map_err(|_| ParseTleError::InvalidEpoch(raw_epoch.to_string()))?;

    let raw_ecc = field(line2, ECCENTRICITY, 2)?;
    let eccentricity = format!("0.{raw_ecc}")
        .parse::<f64>()
        .map_err(|_| ParseTleError::InvalidField {
            field: "eccentricity",
            value: raw_ecc.to_string(),
        })?;

    Ok(MeanElementSet {
        epoch: tle_epoch_to_epoch(epoch),
        inclination: float_field(line2, INCLINATION, "inclination")?,
        eccentricity,
        raan: float_field(line2, RAAN, "RAAN")?,
        argument_of_perigee: float_field(line2, ARG_PERIGEE, "argument of perigee")?,
        mean_anomaly: float_field(line2, MEAN_ANOMALY, "mean anomaly")?,
        mean_motion: float_field(line2, MEAN_MOTION, "mean motion")?,
    })
}

/// Parse every element set of a TLE text.
///
/// Name lines (three-line format) and blank lines are ignored: a set is any line
/// starting with `1 ` immediately followed by a line starting with `2 `. Sets that fail
/// to parse are skipped with a warning.
pub fn parse_tle_text(text: &str) -> Vec<MeanElementSet> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();

    let mut sets = Vec::new();
    let mut k = 0;
    while k < lines.len() {
        if lines[k].starts_with("1 ") && lines.get(k + 1).is_some_and(|l| l.starts_with("2 ")) {
            match parse_tle(lines[k], lines[k + 1]) {
                Ok(set) => sets.push(set),
                Err(e) => warn!("Skipping TLE at line {}: {e}", k + 1),
            }
            k += 2;
        } else {
            k += 1;
        }
    }

    debug!("Parsed {} element sets", sets.len());
    sets
}

/// Read a TLE file and parse all of its element sets.
///
/// Errors
/// ----------
/// * [`SatodError::IoError`] if the file cannot be read.
pub fn read_tle_file(path: &Utf8Path) -> Result<Vec<MeanElementSet>, SatodError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_tle_text(&content))
}
