//! # Constants and type definitions for satod
//!
//! Physical constants, unit conversion factors and the type aliases shared by the
//! propagation and orbit-determination modules.
//!
//! ## Units
//!
//! - Distances: **kilometers**
//! - Times: **seconds** (epochs are carried as [`hifitime::Epoch`] in the I/O layers)
//! - Angles: **degrees** at public boundaries, **radians** internally

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth gravitational parameter in km³/s² (WGS84 / EGM96)
pub const MU_EARTH: f64 = 398_600.441_8;

/// Linear Earth rotation rate used for the sidereal angle, in degrees per second.
///
/// One full turn per solar day; this is the short-span approximation, not an
/// Earth orientation model.
pub const EARTH_ROTATION_DEG_PER_SEC: f64 = 360.0 / SECONDS_PER_DAY;

/// Offset between the GMAT modified Julian date and the Julian date
pub const GMAT_MJD_OFFSET: f64 = 2_430_000.0;

/// Threshold below which the node vector or the eccentricity is treated as zero.
pub const DEGENERACY_EPS: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Time in seconds
pub type Second = f64;
/// Gregorian calendar day (year, month, day)
pub type CalendarDay = (i32, u8, u8);
