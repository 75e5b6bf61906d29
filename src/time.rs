//! # Time conversions
//!
//! Pure conversions between the simulation timestamp (milliseconds since the Unix epoch)
//! and the astronomical time arguments consumed by the element interpolator:
//!
//! ```text
//! Unix ms ──► Julian Date ──► Julian centuries since J2000.0 (T)
//! ```
//!
//! The conversions are deliberately plain arithmetic on `f64` (no leap-second handling):
//! the mean elements are only meaningful to a few arc-minutes, far coarser than the
//! UTC/TT offset. [`hifitime::Epoch`] is used at the edges, to read the wall clock and to
//! hand calendar epochs back to callers.

use hifitime::Epoch;

use crate::{
    constants::{
        Centuries, Degree, JulianDate, Radian, UnixMillis, DAYS_PER_CENTURY, JD_J2000,
        JD_UNIX_EPOCH, MILLIS_PER_DAY, RADEG,
    },
    orrery_errors::OrreryError,
};

/// Transformation from Unix milliseconds to Julian Date
///
/// Argument
/// --------
/// * `epoch_ms`: milliseconds elapsed since 1970-01-01T00:00:00 UTC (may be negative)
///
/// Return
/// ------
/// * the Julian Date `epoch_ms / 86 400 000 + 2 440 587.5`
pub fn julian_date(epoch_ms: UnixMillis) -> JulianDate {
    epoch_ms / MILLIS_PER_DAY + JD_UNIX_EPOCH
}

/// Transformation from Julian Date to Julian centuries elapsed since J2000.0
///
/// Argument
/// --------
/// * `jd`: a Julian Date
///
/// Return
/// ------
/// * `T = (jd − 2 451 545.0) / 36 525.0`
pub fn centuries_since_j2000(jd: JulianDate) -> Centuries {
    (jd - JD_J2000) / DAYS_PER_CENTURY
}

/// Julian centuries since J2000.0 for a Unix timestamp in milliseconds.
pub fn centuries_at(epoch_ms: UnixMillis) -> Centuries {
    centuries_since_j2000(julian_date(epoch_ms))
}

pub fn deg_to_rad(angle: Degree) -> Radian {
    angle * RADEG
}

pub fn rad_to_deg(angle: Radian) -> Degree {
    angle / RADEG
}

/// Seconds elapsed since the last UTC midnight, in `[0, 86 400)`.
pub fn seconds_since_utc_midnight(epoch_ms: UnixMillis) -> f64 {
    epoch_ms.rem_euclid(MILLIS_PER_DAY) / 1000.0
}

/// Convert a hifitime [`Epoch`] into Unix milliseconds.
pub fn epoch_to_unix_ms(epoch: &Epoch) -> UnixMillis {
    epoch.to_unix_milliseconds()
}

/// Convert Unix milliseconds into a hifitime [`Epoch`] (UTC).
pub fn unix_ms_to_epoch(epoch_ms: UnixMillis) -> Epoch {
    Epoch::from_unix_milliseconds(epoch_ms)
}

/// Read the host wall clock as Unix milliseconds.
///
/// Return
/// ------
/// * the current time, or [`OrreryError::ClockError`] if the system clock cannot be read
pub fn wall_clock_unix_ms() -> Result<UnixMillis, OrreryError> {
    let now = Epoch::now()?;
    Ok(epoch_to_unix_ms(&now))
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_julian_date() {
        assert_eq!(julian_date(0.0), 2440587.5);
        assert_eq!(julian_date(86_400_000.0), 2440588.5);
        assert_eq!(julian_date(-86_400_000.0), 2440586.5);

        // 2000-01-01T12:00:00 UTC
        assert_eq!(julian_date(946_728_000_000.0), 2451545.0);
    }

    #[test]
    fn test_centuries_since_j2000() {
        assert_eq!(centuries_since_j2000(JD_J2000), 0.0);
        assert_eq!(centuries_since_j2000(JD_J2000 + 36525.0), 1.0);
        assert_eq!(centuries_since_j2000(JD_J2000 - 3652.5), -0.1);
        assert_eq!(centuries_at(946_728_000_000.0), 0.0);
    }

    #[test]
    fn test_angle_conversion() {
        assert_abs_diff_eq!(deg_to_rad(180.0), std::f64::consts::PI, epsilon = 1e-15);
        assert_abs_diff_eq!(rad_to_deg(std::f64::consts::FRAC_PI_2), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rad_to_deg(deg_to_rad(-123.456)), -123.456, epsilon = 1e-12);
    }

    #[test]
    fn test_seconds_since_utc_midnight() {
        assert_eq!(seconds_since_utc_midnight(0.0), 0.0);
        assert_eq!(seconds_since_utc_midnight(946_728_000_000.0), 43_200.0);
        // one hour before the Unix epoch
        assert_eq!(seconds_since_utc_midnight(-3_600_000.0), 82_800.0);
    }

    #[test]
    fn test_epoch_bridge() {
        let epoch = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        let ms = epoch_to_unix_ms(&epoch);
        assert_abs_diff_eq!(ms, 946_728_000_000.0, epsilon = 1e-3);
        assert_abs_diff_eq!(julian_date(ms), JD_J2000, epsilon = 1e-9);

        let back = unix_ms_to_epoch(ms);
        assert_abs_diff_eq!(epoch_to_unix_ms(&back), ms, epsilon = 1e-3);
    }

    #[test]
    fn test_wall_clock_is_after_j2000() {
        let now = wall_clock_unix_ms().unwrap();
        assert!(centuries_at(now) > 0.2);
    }
}
