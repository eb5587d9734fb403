//! # Constants and type definitions for radcorr
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, hours ↔ radians, arcseconds ↔ radians)
//! - Time origins (J2000.0, JD ↔ MJD offset)
//! - Speed of light and Earth rotation speed used by the velocity decomposition
//! - Definition of the standard Local Standard of Rest (LSR) solar motion
//! - The default observing site

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Astronomical Unit in kilometers, as used by the Stumpff velocity series
pub const AU_STUMPFF: f64 = 1.4959787e8;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Equatorial rotation speed of the Earth in km/s
pub const EARTH_SPIN_SPEED: f64 = 0.465;

// -------------------------------------------------------------------------------------------------
// Local Standard of Rest
// -------------------------------------------------------------------------------------------------

/// Right ascension of the standard solar apex, in hours (equinox 1900)
pub const LSR_APEX_RA_HOURS: f64 = 18.0;

/// Declination of the standard solar apex, in degrees (equinox 1900)
pub const LSR_APEX_DEC_DEG: f64 = 30.0;

/// Equinox in which the standard solar apex is defined
pub const LSR_APEX_EQUINOX: f64 = 1900.0;

/// Speed of the Sun with respect to the LSR, in km/s
pub const LSR_SOLAR_SPEED: f64 = 20.0;

/// Equinox of the source coordinates expected by the velocity corrections
pub const REFERENCE_EQUINOX: f64 = 2000.0;

// -------------------------------------------------------------------------------------------------
// Default observing site (Campbell Hall, Leuschner Observatory)
// -------------------------------------------------------------------------------------------------

/// Geodetic north latitude of the default site, in degrees
pub const DEFAULT_SITE_LATITUDE: f64 = 37.8732;

/// West longitude of the default site, in degrees
pub const DEFAULT_SITE_WEST_LONGITUDE: f64 = 122.2573;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Angle or time in hours
pub type Hour = f64;
/// Velocity in kilometers per second
pub type KmPerSec = f64;
/// Julian Date (days)
pub type JD = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Decimal year designating an equinox (e.g. 1950.0, 2000.0)
pub type Equinox = f64;
