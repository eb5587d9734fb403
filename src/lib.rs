//! # radcorr
//!
//! Radial-velocity corrections of astronomical observations and equatorial precession.
//!
//! - [`precession`] moves (RA, Dec) between equinoxes with the FK4 or FK5 constants,
//!   on top of the matrices of [`ref_system`].
//! - [`doppler`] projects the motion of the observatory onto the line of sight and returns
//!   the geocentric, heliocentric, barycentric and LSR corrections.
//! - [`earth_velocity`] and [`time`] provide the Earth velocity and the local sidereal time
//!   consumed by the corrections, behind the [`EarthVelocity`] and [`SiderealClock`] traits.
//!
//! Everything is a pure function of its inputs: no I/O, no global state.

pub mod constants;
pub mod conversion;
pub mod doppler;
pub mod earth_velocity;
pub mod observers;
pub mod precession;
pub mod radcorr_errors;
pub mod ref_system;
pub mod time;

pub use crate::doppler::{
    compute_velocities, DopplerConfig, DopplerCorrector, DopplerReport, ObservationSample,
    SampleCorrection, VelocityCorrection, VelocityUnit,
};
pub use crate::earth_velocity::{EarthVelocity, Stumpff};
pub use crate::observers::ObserverLocation;
pub use crate::precession::{precess, precess_batch, AngleUnit, EquatorialCoordinate, Precessor};
pub use crate::radcorr_errors::RadcorrError;
pub use crate::ref_system::{premat, PrecessionFrame};
pub use crate::time::{MeanSiderealClock, SiderealClock};
