use hifitime::{Epoch, Unit};

use crate::constants::{CalendarDay, Second, GMAT_MJD_OFFSET, SECONDS_PER_DAY};

/// Conversion factor between Julian Date and Modified Julian Date
const JDTOMJD: f64 = 2_400_000.5;

/// Transformation from a GMAT modified Julian date to a UTC epoch
///
/// GMAT counts days from JD 2430000.0, i.e. `JD = gmat_mjd + 2430000.0`.
///
/// Argument
/// --------
/// * `gmat_mjd`: a date in GMAT modified Julian days
///
/// Return
/// ------
/// * the corresponding [`Epoch`] in the UTC time scale
pub fn gmat_mjd_to_epoch(gmat_mjd: f64) -> Epoch {
    Epoch::from_mjd_utc(gmat_mjd + GMAT_MJD_OFFSET - JDTOMJD)
}

/// Transformation from a TLE epoch field (`YYDDD.DDDDDDDD`) to a UTC epoch
///
/// Two-digit years below 57 belong to the 21st century, the others to the 20th.
/// The day of year is one-based and carries the fraction of the day.
///
/// Argument
/// --------
/// * `tle_epoch`: the numeric epoch field of a TLE line 1
///
/// Return
/// ------
/// * the corresponding [`Epoch`] in the UTC time scale
pub fn tle_epoch_to_epoch(tle_epoch: f64) -> Epoch {
    let two_digit_year = (tle_epoch / 1000.0).floor();
    let day_of_year = tle_epoch - two_digit_year * 1000.0;

    let year = if two_digit_year < 57.0 {
        2000 + two_digit_year as i32
    } else {
        1900 + two_digit_year as i32
    };

    Epoch::from_gregorian_utc_at_midnight(year, 1, 1) + Unit::Day * (day_of_year - 1.0)
}

/// Elapsed seconds from `start` to `end` (negative if `end` precedes `start`).
pub fn seconds_between(start: Epoch, end: Epoch) -> Second {
    (end - start).to_seconds()
}

/// UTC calendar day of an epoch.
pub fn calendar_day(epoch: Epoch) -> CalendarDay {
    let (y, m, d, _, _, _, _) = epoch.to_gregorian_utc();
    (y, m, d)
}

/// Seconds elapsed since the UTC midnight of the epoch's own day, in `[0, 86400)`.
pub fn seconds_since_midnight(epoch: Epoch) -> Second {
    let (_, _, _, h, mi, s, ns) = epoch.to_gregorian_utc();
    let secs = f64::from(h) * 3600.0 + f64::from(mi) * 60.0 + f64::from(s) + f64::from(ns) * 1e-9;
    secs.min(SECONDS_PER_DAY)
}
