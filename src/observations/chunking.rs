//! # Day / chunk binning of GPS records
//!
//! Groups GPS records by UTC calendar day, splits every day into fixed-length chunks
//! counted from midnight, and keeps the most populated chunk of each day. The nearest
//! consecutive pair of a day's points is then a convenient short-baseline input for
//! two-sample orbit determination.
//!
//! Ties between equally populated chunks go to the earliest chunk of the day.
use std::{cmp::Reverse, collections::BTreeMap};

use hifitime::Epoch;
use itertools::Itertools;
use log::debug;

use crate::{
    constants::CalendarDay,
    observations::gmat_reader::GpsRecord,
    satod_errors::SatodError,
    time::{calendar_day, seconds_since_midnight},
};

/// Default chunk length in hours.
pub const DEFAULT_CHUNK_HOURS: f64 = 1.5;

fn check_chunk_hours(chunk_hours: f64) -> Result<(), SatodError> {
    if chunk_hours > 0.0 && chunk_hours.is_finite() {
        Ok(())
    } else {
        Err(SatodError::InvalidChunkLength(chunk_hours))
    }
}

/// Calendar day and chunk label of an epoch.
///
/// The label is `floor(seconds_since_midnight / (3600 · chunk_hours))`.
///
/// Errors
/// ----------
/// * [`SatodError::InvalidChunkLength`] if `chunk_hours` is not finite and positive.
pub fn assign_chunk(epoch: Epoch, chunk_hours: f64) -> Result<(CalendarDay, u32), SatodError> {
    check_chunk_hours(chunk_hours)?;
    let label = (seconds_since_midnight(epoch) / (3600.0 * chunk_hours)).floor() as u32;
    Ok((calendar_day(epoch), label))
}

/// Records of the most populated chunk of every day, in input order.
///
/// Arguments
/// -----------------
/// * `records` – GPS records, in any order across days.
/// * `chunk_hours` – chunk length in hours (see [`DEFAULT_CHUNK_HOURS`]).
///
/// Return
/// ----------
/// * A map from calendar day to the records of that day's busiest chunk.
///
/// Errors
/// ----------
/// * [`SatodError::InvalidChunkLength`] if `chunk_hours` is not finite and positive.
pub fn busiest_chunk_per_day(
    records: &[GpsRecord],
    chunk_hours: f64,
) -> Result<BTreeMap<CalendarDay, Vec<GpsRecord>>, SatodError> {
    check_chunk_hours(chunk_hours)?;

    let by_day: BTreeMap<CalendarDay, Vec<(u32, &GpsRecord)>> = records
        .iter()
        .map(|r| {
            let (day, label) = assign_chunk(r.epoch, chunk_hours)?;
            Ok((day, (label, r)))
        })
        .collect::<Result<Vec<_>, SatodError>>()?
        .into_iter()
        .into_group_map()
        .into_iter()
        .collect();

    Ok(by_day
        .into_iter()
        .filter_map(|(day, entries)| {
            let counts = entries.iter().map(|(label, _)| *label).counts();
            let (best, count) = counts
                .into_iter()
                .min_by_key(|&(label, count)| (Reverse(count), label))?;

            debug!("Day {day:?}: chunk {best} holds {count} points");

            let chunk = entries
                .into_iter()
                .filter(|(label, _)| *label == best)
                .map(|(_, r)| r.clone())
                .collect();
            Some((day, chunk))
        })
        .collect())
}

/// Consecutive pair of records whose positions are the closest, as indices `(k, k + 1)`.
///
/// Returns `None` when fewer than two records are given. Ties keep the earliest pair.
pub fn nearest_consecutive_pair(records: &[GpsRecord]) -> Option<(usize, usize)> {
    records
        .iter()
        .tuple_windows()
        .map(|(r1, r2)| (r2.position - r1.position).norm())
        .enumerate()
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
        .map(|(k, _)| (k, k + 1))
}

/// [`nearest_consecutive_pair`] applied to every day, returning the two records with their
/// epochs; days with fewer than two records are left out.
pub fn nearest_pair_per_day(
    days: &BTreeMap<CalendarDay, Vec<GpsRecord>>,
) -> BTreeMap<CalendarDay, (GpsRecord, GpsRecord)> {
    days.iter()
        .filter_map(|(day, records)| {
            let (k0, k1) = nearest_consecutive_pair(records)?;
            Some((*day, (records[k0].clone(), records[k1].clone())))
        })
        .collect()
}
