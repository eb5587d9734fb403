//! # Precession of equatorial coordinates
//!
//! Move a right ascension / declination pair from the mean equator and equinox of one
//! epoch to another, using the FK4 (B1950-based) or FK5 (J2000-based) precession
//! constants from [`premat`](crate::ref_system::premat).
//!
//! ## Entry points
//!
//! - [`precess`] – one coordinate pair.
//! - [`precess_batch`] – equal-length slices of right ascensions and declinations.
//! - [`Precessor`] – holds the matrix of a fixed epoch pair for repeated use.
//!
//! ## Accuracy
//!
//! Precession should not be used more than 2.5 centuries away from 2000 (FK5) or
//! 1950 (FK4), and loses accuracy for declinations near ±90°. These limits are not
//! enforced: out-of-range inputs are computed without error.
//!
//! ## Example
//!
//! ```rust
//! use radcorr::precession::{precess, AngleUnit, EquatorialCoordinate};
//! use radcorr::ref_system::PrecessionFrame;
//!
//! // Polaris, J2000.0 → J1985.0
//! let polaris = EquatorialCoordinate::new(37.942916666666666, 89.26405555555556);
//! let moved = precess(polaris, 2000.0, 1985.0, PrecessionFrame::FK5, AngleUnit::Degrees);
//! assert!((moved.dec - 89.19647).abs() < 1e-4);
//! ```

use itertools::izip;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::constants::{Equinox, DPI, RADEG};
use crate::radcorr_errors::RadcorrError;
use crate::ref_system::{direction_cosines, direction_to_radec, premat, PrecessionFrame};

/// Unit shared by both fields of an [`EquatorialCoordinate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Factor converting a value in this unit to radians.
    fn to_radians(self) -> f64 {
        match self {
            AngleUnit::Degrees => RADEG,
            AngleUnit::Radians => 1.0,
        }
    }

    /// One full turn expressed in this unit.
    pub fn full_turn(self) -> f64 {
        match self {
            AngleUnit::Degrees => 360.0,
            AngleUnit::Radians => DPI,
        }
    }
}

/// Right ascension and declination, both in the same [`AngleUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinate {
    pub ra: f64,
    pub dec: f64,
}

impl EquatorialCoordinate {
    pub fn new(ra: f64, dec: f64) -> Self {
        EquatorialCoordinate { ra, dec }
    }
}

/// Precession between a fixed pair of equinoxes.
///
/// The matrix is computed once in [`Precessor::new`], which makes this the cheaper
/// option when many coordinates share the same epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct Precessor {
    matrix: Matrix3<f64>,
    unit: AngleUnit,
}

impl Precessor {
    /// Arguments
    /// ---------
    /// * `equinox1`: equinox of the input coordinates (decimal years).
    /// * `equinox2`: equinox of the output coordinates (decimal years).
    /// * `frame`: FK4 or FK5 precession constants.
    /// * `unit`: unit of both input and output angles.
    pub fn new(
        equinox1: Equinox,
        equinox2: Equinox,
        frame: PrecessionFrame,
        unit: AngleUnit,
    ) -> Self {
        Precessor {
            matrix: premat(equinox1, equinox2, frame),
            unit,
        }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Precess one coordinate pair.
    ///
    /// The output right ascension lies in `[0, 360)` degrees or `[0, 2π)` radians.
    pub fn apply(&self, coord: EquatorialCoordinate) -> EquatorialCoordinate {
        let scale = self.unit.to_radians();
        let x = direction_cosines(coord.ra * scale, coord.dec * scale);

        let (ra, dec) = direction_to_radec(&(self.matrix * x));

        let ra = ra / scale;
        let turn = self.unit.full_turn();
        // Conversion back from radians may land exactly on a full turn
        let ra = if ra >= turn { ra - turn } else { ra };

        EquatorialCoordinate::new(ra, dec / scale)
    }
}

/// Precess a coordinate pair from `equinox1` to `equinox2`.
///
/// Arguments
/// ---------
/// * `coord`: input right ascension and declination, in `unit`.
/// * `equinox1`: original equinox (decimal years).
/// * `equinox2`: equinox of the precessed coordinates (decimal years).
/// * `frame`: [`PrecessionFrame::FK5`] for J2000-based coordinates, [`PrecessionFrame::FK4`]
///   for B1950-based ones.
/// * `unit`: unit of input and output angles.
///
/// Returns
/// --------
/// * The coordinate at `equinox2`, in the same unit, with right ascension normalized
///   into one full turn.
///
/// # See also
/// * [`precess_batch`] – slice version
/// * [`crate::ref_system::premat`] – precession matrix
pub fn precess(
    coord: EquatorialCoordinate,
    equinox1: Equinox,
    equinox2: Equinox,
    frame: PrecessionFrame,
    unit: AngleUnit,
) -> EquatorialCoordinate {
    Precessor::new(equinox1, equinox2, frame, unit).apply(coord)
}

/// Precess equal-length slices of right ascensions and declinations.
///
/// The precession matrix is built once for the whole batch.
///
/// Errors
/// ----------
/// * [`RadcorrError::CoordinateShapeMismatch`] if `ra` and `dec` differ in length. No
///   coordinate is processed in that case.
pub fn precess_batch(
    ra: &[f64],
    dec: &[f64],
    equinox1: Equinox,
    equinox2: Equinox,
    frame: PrecessionFrame,
    unit: AngleUnit,
) -> Result<(Vec<f64>, Vec<f64>), RadcorrError> {
    if ra.len() != dec.len() {
        return Err(RadcorrError::CoordinateShapeMismatch {
            ra: ra.len(),
            dec: dec.len(),
        });
    }

    let precessor = Precessor::new(equinox1, equinox2, frame, unit);

    Ok(izip!(ra, dec)
        .map(|(&a, &d)| {
            let out = precessor.apply(EquatorialCoordinate::new(a, d));
            (out.ra, out.dec)
        })
        .unzip())
}
