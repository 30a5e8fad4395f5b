//! CSV export of an [`OrbitalElementHistory`].
//!
//! One row per entry, columns `timestamp,a,e,i,raan,omega,nu` (seconds, km and degrees).
use std::io::Write;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::{
    constants::Second,
    orbit_determination::{HistoryEntry, OrbitalElementHistory},
    orbit_type::classical_element::ClassicalOrbitalElements,
    satod_errors::SatodError,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct HistoryRow {
    timestamp: Second,
    a: f64,
    e: f64,
    i: f64,
    raan: f64,
    omega: f64,
    nu: f64,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let el = &entry.elements;
        HistoryRow {
            timestamp: entry.time,
            a: el.semi_major_axis,
            e: el.eccentricity,
            i: el.inclination,
            raan: el.raan,
            omega: el.argument_of_perigee,
            nu: el.true_anomaly,
        }
    }
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        HistoryEntry {
            time: row.timestamp,
            elements: ClassicalOrbitalElements {
                semi_major_axis: row.a,
                eccentricity: row.e,
                inclination: row.i,
                raan: row.raan,
                argument_of_perigee: row.omega,
                true_anomaly: row.nu,
            },
        }
    }
}

/// Write a history as CSV, header included.
pub fn write_history_csv<W: Write>(
    history: &OrbitalElementHistory,
    writer: W,
) -> Result<(), SatodError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in history {
        wtr.serialize(HistoryRow::from(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a history to a CSV file, replacing any existing file.
pub fn write_history_csv_file(
    history: &OrbitalElementHistory,
    path: &Utf8Path,
) -> Result<(), SatodError> {
    let file = std::fs::File::create(path)?;
    write_history_csv(history, file)
}

/// Read back a history written by [`write_history_csv`].
pub fn read_history_csv_file(path: &Utf8Path) -> Result<OrbitalElementHistory, SatodError> {
    let mut rdr = csv::Reader::from_path(path)?;
    rdr.deserialize::<HistoryRow>()
        .map(|row| row.map(HistoryEntry::from).map_err(SatodError::from))
        .collect()
}
