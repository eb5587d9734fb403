use hifitime::{Epoch, TimeScale};
use std::str::FromStr;

use crate::constants::{Degree, Hour, DPI, JD, JDTOMJD, MJD, RADEG, RADH, SECONDS_PER_DAY, T2000};
use crate::radcorr_errors::RadcorrError;

/// Source of local sidereal time used by the Earth spin correction.
///
/// Implementors must return hours in `[0, 24)` and be pure functions of their inputs.
pub trait SiderealClock {
    /// Local sidereal time in hours.
    ///
    /// Arguments
    /// ---------
    /// * `julian_day`: full Julian Day (UT1 is assumed, UTC is accurate to ~1 s).
    /// * `east_longitude`: observer longitude in degrees, positive toward the east.
    fn local_sidereal_time(&self, julian_day: JD, east_longitude: Degree) -> Hour;
}

/// Local **mean** sidereal time from the IAU 1982 GMST polynomial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanSiderealClock;

impl SiderealClock for MeanSiderealClock {
    fn local_sidereal_time(&self, julian_day: JD, east_longitude: Degree) -> Hour {
        let lmst = (gmst(jd_to_mjd(julian_day)) + east_longitude * RADEG).rem_euclid(DPI);
        // rem_euclid can round up to exactly 2π
        (lmst / RADH) % 24.0
    }
}

/// Transformation from julian date (JD) to modified julian date (MJD)
pub fn jd_to_mjd(jd: JD) -> MJD {
    jd - JDTOMJD
}

/// Transformation from modified julian date (MJD) to julian date (JD)
pub fn mjd_to_jd(mjd: MJD) -> JD {
    mjd + JDTOMJD
}

/// Julian date (UTC) of a Gregorian calendar instant.
///
/// Argument
/// --------
/// * `year`, `month`, `day`, `hour`, `minute`: calendar fields in UTC
/// * `second`: seconds, fractional part kept to the nanosecond
///
/// Return
/// ------
/// * The full Julian date, or [`RadcorrError::InvalidDate`] when the fields do not form a valid date
pub fn gregorian_to_jd(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
) -> Result<JD, RadcorrError> {
    if !(0.0..60.0).contains(&second) {
        return Err(RadcorrError::InvalidDate(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second}"
        )));
    }

    let whole = second.trunc() as u8;
    let nanos = ((second - second.trunc()) * 1e9).round() as u32;

    let epoch = Epoch::maybe_from_gregorian(
        year,
        month,
        day,
        hour,
        minute,
        whole,
        nanos.min(999_999_999),
        TimeScale::UTC,
    )
    .map_err(|e| RadcorrError::InvalidDate(e.to_string()))?;

    Ok(epoch.to_jde_utc_days())
}

/// Julian date (UTC) of an ISO 8601 timestamp such as `2021-01-01T00:00:00`.
pub fn iso_date_to_jd(date: &str) -> Result<JD, RadcorrError> {
    Epoch::from_str(date)
        .map(|epoch| epoch.to_jde_utc_days())
        .map_err(|e| RadcorrError::InvalidDate(format!("{date}: {e}")))
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let day = tjm.floor();
    let t = (day - T2000) / 36525.0;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;

    let gmst = gmst0 + (tjm - day) * DPI * RAP;
    let gmst = gmst.rem_euclid(DPI);
    if gmst >= DPI {
        0.0
    } else {
        gmst
    }
}
