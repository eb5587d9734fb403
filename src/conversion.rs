use crate::constants::{Degree, Hour};
use crate::radcorr_errors::RadcorrError;

/// Convert a sexagesimal triplet to a decimal value.
///
/// The result is negative when any of the three fields is negative, so both
/// `ten(-56.0, 59.0, 33.0)` and `ten(-0.0, 30.0, 0.0)` give a southern declination.
///
/// Arguments
/// ---------
/// * `d`: degrees (or hours)
/// * `m`: minutes
/// * `s`: seconds
///
/// Return
/// ----------
/// * `d + m/60 + s/3600`, carrying the sign described above
pub fn ten(d: f64, m: f64, s: f64) -> f64 {
    let value = d.abs() + m.abs() / 60.0 + s.abs() / 3600.0;
    if d.is_sign_negative() || m < 0.0 || s < 0.0 {
        -value
    } else {
        value
    }
}

/// Split a decimal value into sexagesimal fields.
///
/// The sign is carried by the first non-zero field, the remaining fields are positive.
///
/// Return
/// ----------
/// * `(d, m, s)` where `d` and `m` are whole numbers and `s` keeps the fractional part
pub fn sixty(x: f64) -> (f64, f64, f64) {
    let a = x.abs();
    let d = a.trunc();
    let m = ((a - d) * 60.0).trunc();
    let s = (a - d - m / 60.0) * 3600.0;

    if x >= 0.0 {
        (d, m, s)
    } else if d != 0.0 {
        (-d, m, s)
    } else if m != 0.0 {
        (d, -m, s)
    } else {
        (d, m, -s)
    }
}

/// Split a whitespace-separated sexagesimal string into its three numeric fields.
fn split_fields(input: &str) -> Result<(&str, f64, f64), RadcorrError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(RadcorrError::InvalidSexagesimal(input.to_string()));
    }

    let parse = |field: &str| {
        field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RadcorrError::InvalidSexagesimal(input.to_string()))
    };

    Ok((parts[0], parse(parts[1])?, parse(parts[2])?))
}

/// Parse a right ascension string to hours
///
/// Arguments
/// ---------
/// * `ra`: a string representing the right ascension in the format `HH MM SS.SS`
///
/// Returns
/// -------
/// * The right ascension in decimal hours, or [`RadcorrError::InvalidSexagesimal`]
pub fn parse_ra_to_hours(ra: &str) -> Result<Hour, RadcorrError> {
    let (h, m, s) = split_fields(ra)?;
    let h: f64 = h
        .parse()
        .map_err(|_| RadcorrError::InvalidSexagesimal(ra.to_string()))?;

    if h.is_sign_negative() || !h.is_finite() || m < 0.0 || s < 0.0 {
        return Err(RadcorrError::InvalidSexagesimal(ra.to_string()));
    }
    Ok(ten(h, m, s))
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `ra`: a string representing the right ascension in the format `HH MM SS.SS`
///
/// Returns
/// -------
/// * The right ascension in degrees, or [`RadcorrError::InvalidSexagesimal`]
pub fn parse_ra_to_deg(ra: &str) -> Result<Degree, RadcorrError> {
    Ok(parse_ra_to_hours(ra)? * 15.0)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: a string representing the declination in the format `±DD MM SS.SS`
///
/// Returns
/// -------
/// * The declination in degrees, or [`RadcorrError::InvalidSexagesimal`]
pub fn parse_dec_to_deg(dec: &str) -> Result<Degree, RadcorrError> {
    let invalid = || RadcorrError::InvalidSexagesimal(dec.to_string());
    let (d, m, s) = split_fields(dec)?;

    // At most one sign, carried by the degrees field only
    let (sign, digits) = match d.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, d.strip_prefix('+').unwrap_or(d)),
    };
    if digits.starts_with(['-', '+']) {
        return Err(invalid());
    }
    let d: f64 = digits.parse().map_err(|_| invalid())?;

    if !d.is_finite() || m < 0.0 || s < 0.0 {
        return Err(invalid());
    }
    Ok(sign * ten(d, m, s))
}
