//! # GMAT GPS measurement reader
//!
//! Reads the whitespace-separated GPS position records written by GMAT (`.gmd` files):
//!
//! ```text
//! <gmat_mjd> <measurement type> <satellite id> <additional id> <X> <Y> <Z>
//! ```
//!
//! Timestamps are GMAT modified Julian days (see [`gmat_mjd_to_epoch`]); positions are
//! Earth-fixed, in kilometers. Lines starting with `%` or `#` and blank lines are ignored.
use camino::Utf8Path;
use hifitime::Epoch;
use log::{debug, warn};
use nalgebra::Vector3;
use thiserror::Error;

use crate::{
    observations::PositionSample,
    satod_errors::SatodError,
    time::{gmat_mjd_to_epoch, seconds_between},
};

const COLUMNS: usize = 7;

/// Line-level parsing errors for GMAT measurement records.
#[derive(Error, Debug, PartialEq)]
pub enum ParseGmatError {
    #[error("Expected {COLUMNS} columns, found {0}")]
    WrongColumnCount(usize),
    #[error("Invalid {column}: {value}")]
    InvalidNumber { column: &'static str, value: String },
}

/// One GPS position record.
///
/// # Fields
///
/// * `epoch` - UTC epoch of the measurement
/// * `measurement_type` - GMAT measurement type tag (e.g. `GPS_PosVec`)
/// * `satellite_id` - Participant identifier of the measured spacecraft
/// * `additional_id` - Second participant identifier
/// * `position` - Earth-fixed position in kilometers
#[derive(Debug, Clone, PartialEq)]
pub struct GpsRecord {
    pub epoch: Epoch,
    pub measurement_type: String,
    pub satellite_id: String,
    pub additional_id: String,
    pub position: Vector3<f64>,
}

fn parse_number(raw: &str, column: &'static str) -> Result<f64, ParseGmatError> {
    raw.parse::<f64>().map_err(|_| ParseGmatError::InvalidNumber {
        column,
        value: raw.to_string(),
    })
}

/// Parse a single GMAT measurement line.
pub fn parse_gmat_line(line: &str) -> Result<GpsRecord, SatodError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != COLUMNS {
        return Err(ParseGmatError::WrongColumnCount(parts.len()).into());
    }

    let gmat_mjd = parse_number(parts[0], "timestamp")?;
    let position = Vector3::new(
        parse_number(parts[4], "X")?,
        parse_number(parts[5], "Y")?,
        parse_number(parts[6], "Z")?,
    );

    Ok(GpsRecord {
        epoch: gmat_mjd_to_epoch(gmat_mjd),
        measurement_type: parts[1].to_string(),
        satellite_id: parts[2].to_string(),
        additional_id: parts[3].to_string(),
        position,
    })
}

/// Parse every record of a GMAT measurement text, skipping malformed lines with a warning.
pub fn parse_gmat_text(text: &str) -> Vec<GpsRecord> {
    let records: Vec<GpsRecord> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !(line.is_empty() || line.starts_with('%') || line.starts_with('#'))
        })
        .filter_map(|(k, line)| match parse_gmat_line(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping GMAT record at line {}: {e}", k + 1);
                None
            }
        })
        .collect();

    debug!("Parsed {} GPS records", records.len());
    records
}

/// Read a GMAT measurement file.
///
/// Errors
/// ----------
/// * [`SatodError::IoError`] if the file cannot be read.
pub fn read_gmat_file(path: &Utf8Path) -> Result<Vec<GpsRecord>, SatodError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_gmat_text(&content))
}

/// Convert records into position samples timed in seconds since the first record.
///
/// The record order is kept; ordering is validated later by the orbit determination.
pub fn to_position_samples(records: &[GpsRecord]) -> Vec<PositionSample> {
    match records.first() {
        Some(first) => records
            .iter()
            .map(|r| PositionSample::new(seconds_between(first.epoch, r.epoch), r.position))
            .collect(),
        None => Vec::new(),
    }
}
