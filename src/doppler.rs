//! # Radial-velocity corrections
//!
//! Project the motion of the observatory onto the line of sight toward a source and
//! express it in four reference frames:
//!
//! | frame         | contributions                                   |
//! |---------------|-------------------------------------------------|
//! | geocentric    | Earth spin                                      |
//! | heliocentric  | Earth spin + Earth orbit around the Sun         |
//! | barycentric   | Earth spin + Earth orbit around the barycenter  |
//! | LSR           | barycentric + solar motion toward the LSR apex  |
//!
//! Negative velocities mean the observatory is **approaching** the source in that frame.
//!
//! ## Inputs
//!
//! - Right ascension in **decimal hours** and declination in **degrees**, equinox J2000.
//! - Full (unmodified) Julian Day.
//! - An [`ObserverLocation`]; [`compute_velocities`] falls back on the documented
//!   default site when none is given.
//!
//! ## The standard LSR
//!
//! The Sun moves at 20 km/s toward RA = 18h, Dec = +30° in equinox 1900 coordinates.
//! The apex is precessed once to J2000 (RA = 18.063955h, Dec = 30.004661°) when a
//! [`DopplerCorrector`] is built. Its x direction cosine is taken as `cos δ · cos(π + α)`,
//! which flips the sign of that component with respect to the plain direction cosine.
//! Published corrections computed with this LSR definition carry the same flip, so it
//! is kept as is.
//!
//! ## Example
//!
//! ```rust
//! use radcorr::doppler::{compute_velocities, VelocityUnit};
//! use radcorr::observers::ObserverLocation;
//!
//! let report = compute_velocities(
//!     &[5.5, 18.0],
//!     &[-5.4, 30.0],
//!     &[2455197.5, 2458849.75],
//!     Some(ObserverLocation::new(37.8732, 122.2573)),
//!     VelocityUnit::KmPerSecond,
//! )?;
//! let first = report.correction(0).unwrap();
//! assert!(first.lsr > first.barycentric);
//! # Ok::<(), radcorr::radcorr_errors::RadcorrError>(())
//! ```

use itertools::izip;
use nalgebra::{Matrix4xX, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{
    Hour, KmPerSec, EARTH_SPIN_SPEED, JD, LSR_APEX_DEC_DEG, LSR_APEX_EQUINOX, LSR_APEX_RA_HOURS,
    LSR_SOLAR_SPEED, RADEG, RADH, REFERENCE_EQUINOX, VLIGHT,
};
use crate::earth_velocity::{EarthVelocity, Stumpff};
use crate::observers::ObserverLocation;
use crate::precession::{precess, AngleUnit, EquatorialCoordinate};
use crate::radcorr_errors::RadcorrError;
use crate::ref_system::{direction_cosines, PrecessionFrame};
use crate::time::{MeanSiderealClock, SiderealClock};

/// Unit of the returned velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VelocityUnit {
    #[default]
    KmPerSecond,
    /// Velocity divided by the speed of light.
    FractionOfLight,
}

/// Settings of a [`DopplerCorrector`].
///
/// Both fields have defaults so a partial configuration deserializes cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DopplerConfig {
    pub observer: ObserverLocation,
    pub unit: VelocityUnit,
}

/// One observation: where the telescope points and when.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSample {
    /// Right ascension, decimal hours, equinox J2000
    pub ra_hours: Hour,
    /// Declination, degrees, equinox J2000
    pub dec_deg: f64,
    /// Full Julian Day
    pub julian_day: JD,
}

impl ObservationSample {
    pub fn new(ra_hours: Hour, dec_deg: f64, julian_day: JD) -> Self {
        ObservationSample {
            ra_hours,
            dec_deg,
            julian_day,
        }
    }
}

/// Projected velocity of the observatory in the four frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityCorrection {
    pub geocentric: f64,
    pub heliocentric: f64,
    pub barycentric: f64,
    pub lsr: f64,
}

impl VelocityCorrection {
    /// `[geocentric, heliocentric, barycentric, lsr]`
    pub fn to_array(self) -> [f64; 4] {
        [self.geocentric, self.heliocentric, self.barycentric, self.lsr]
    }

    fn scaled(self, factor: f64) -> Self {
        VelocityCorrection {
            geocentric: self.geocentric * factor,
            heliocentric: self.heliocentric * factor,
            barycentric: self.barycentric * factor,
            lsr: self.lsr * factor,
        }
    }
}

/// Line-of-sight projections of the individual motions, in km/s.
///
/// Each field is the projection of a velocity onto the source direction, positive when
/// the motion points toward the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityComponents {
    /// Earth velocity relative to the Sun
    pub orbit_helio: KmPerSec,
    /// Earth velocity relative to the barycenter
    pub orbit_bary: KmPerSec,
    /// Solar motion relative to the LSR
    pub lsr: KmPerSec,
    /// Earth rotation at the observer
    pub spin: KmPerSec,
}

impl VelocityComponents {
    /// Combine the projections into frame corrections, in km/s.
    pub fn combine(self) -> VelocityCorrection {
        VelocityCorrection {
            geocentric: -self.spin,
            heliocentric: -self.spin - self.orbit_helio,
            barycentric: -self.spin - self.orbit_bary,
            lsr: -self.spin - self.orbit_bary - self.lsr,
        }
    }
}

/// Result for a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleCorrection {
    pub velocities: VelocityCorrection,
    /// Local mean sidereal time at the observer, hours
    pub lst: Hour,
}

/// Result for a batch of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct DopplerReport {
    /// 4×N matrix, rows are `[geocentric, heliocentric, barycentric, lsr]`,
    /// column `j` belongs to the `j`-th observation.
    pub velocities: Matrix4xX<f64>,
    /// Observer location used for the Earth spin term
    pub observer: ObserverLocation,
    /// Local sidereal time of each observation, hours
    pub lst: Vec<Hour>,
    pub unit: VelocityUnit,
}

impl DopplerReport {
    pub fn len(&self) -> usize {
        self.velocities.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Velocities of the `index`-th observation, `None` when out of range.
    pub fn correction(&self, index: usize) -> Option<VelocityCorrection> {
        if index >= self.len() {
            return None;
        }
        let col = self.velocities.column(index);
        Some(VelocityCorrection {
            geocentric: col[0],
            heliocentric: col[1],
            barycentric: col[2],
            lsr: col[3],
        })
    }
}

/// Velocity of the Sun relative to the LSR, as used by the projection (km/s, J2000).
///
/// See the module documentation for the sign of the x component.
pub fn lsr_solar_velocity() -> Vector3<f64> {
    let apex = precess(
        EquatorialCoordinate::new(LSR_APEX_RA_HOURS * RADH, LSR_APEX_DEC_DEG * RADEG),
        LSR_APEX_EQUINOX,
        REFERENCE_EQUINOX,
        PrecessionFrame::FK5,
        AngleUnit::Radians,
    );

    let cos_dec = apex.dec.cos();
    Vector3::new(
        cos_dec * (std::f64::consts::PI + apex.ra).cos(),
        cos_dec * apex.ra.sin(),
        apex.dec.sin(),
    ) * LSR_SOLAR_SPEED
}

/// Four-frame radial-velocity corrector.
///
/// The Earth velocity and the sidereal time come from the `E` and `S` collaborators;
/// [`DopplerCorrector::new`] uses the [`Stumpff`] series and the [`MeanSiderealClock`].
///
/// See also
/// ------------
/// * [`compute_velocities`] – one-call batch helper
#[derive(Debug, Clone)]
pub struct DopplerCorrector<E = Stumpff, S = MeanSiderealClock> {
    config: DopplerConfig,
    earth: E,
    clock: S,
    lsr_velocity: Vector3<f64>,
}

impl DopplerCorrector {
    pub fn new(config: DopplerConfig) -> Self {
        DopplerCorrector::with_collaborators(config, Stumpff, MeanSiderealClock)
    }
}

impl Default for DopplerCorrector {
    fn default() -> Self {
        DopplerCorrector::new(DopplerConfig::default())
    }
}

impl<E: EarthVelocity, S: SiderealClock> DopplerCorrector<E, S> {
    pub fn with_collaborators(config: DopplerConfig, earth: E, clock: S) -> Self {
        let lsr_velocity = lsr_solar_velocity();
        debug!(
            latitude = config.observer.latitude,
            west_longitude = config.observer.west_longitude,
            unit = ?config.unit,
            "doppler corrector ready"
        );

        DopplerCorrector {
            config,
            earth,
            clock,
            lsr_velocity,
        }
    }

    pub fn config(&self) -> &DopplerConfig {
        &self.config
    }

    pub fn lsr_velocity(&self) -> &Vector3<f64> {
        &self.lsr_velocity
    }

    /// Projected contributions (km/s) and local sidereal time of one observation.
    pub fn components(&self, sample: &ObservationSample) -> (VelocityComponents, Hour) {
        let ra = sample.ra_hours * 15.0 * RADEG;
        let dec = sample.dec_deg * RADEG;
        let source = direction_cosines(ra, dec);

        let (helio, bary) = self.earth.velocity(sample.julian_day, REFERENCE_EQUINOX);

        let observer = &self.config.observer;
        let lst = self
            .clock
            .local_sidereal_time(sample.julian_day, observer.east_longitude());

        // Hour angle (lst - ra) drives the rotational term
        let spin = -EARTH_SPIN_SPEED
            * (observer.latitude * RADEG).cos()
            * dec.cos()
            * ((lst - sample.ra_hours) * 15.0 * RADEG).sin();

        let components = VelocityComponents {
            orbit_helio: helio.dot(&source),
            orbit_bary: bary.dot(&source),
            lsr: self.lsr_velocity.dot(&source),
            spin,
        };
        trace!(?sample, ?components, lst, "projected velocities");

        (components, lst)
    }

    /// Velocity corrections of one observation, in the configured unit.
    pub fn correct(&self, sample: &ObservationSample) -> SampleCorrection {
        let (components, lst) = self.components(sample);
        let velocities = components.combine();

        let velocities = match self.config.unit {
            VelocityUnit::KmPerSecond => velocities,
            VelocityUnit::FractionOfLight => velocities.scaled(1.0 / VLIGHT),
        };

        SampleCorrection { velocities, lst }
    }

    /// Velocity corrections of a list of observations.
    ///
    /// Observations are independent: each column of the report equals
    /// [`DopplerCorrector::correct`] on the matching sample.
    pub fn correct_samples(&self, samples: &[ObservationSample]) -> DopplerReport {
        debug!(samples = samples.len(), "computing velocity corrections");

        let corrections: Vec<SampleCorrection> = samples.iter().map(|s| self.correct(s)).collect();

        DopplerReport {
            velocities: Matrix4xX::from_iterator(
                corrections.len(),
                corrections.iter().flat_map(|c| c.velocities.to_array()),
            ),
            observer: self.config.observer,
            lst: corrections.iter().map(|c| c.lst).collect(),
            unit: self.config.unit,
        }
    }

    /// Velocity corrections from three parallel columns.
    ///
    /// Arguments
    /// -----------------
    /// * `ra_hours`: right ascensions, decimal hours, J2000.
    /// * `dec_deg`: declinations, degrees, J2000.
    /// * `julian_day`: full Julian Days.
    ///
    /// Errors
    /// ----------
    /// * [`RadcorrError::InputShapeMismatch`] when the three slices differ in length.
    ///   Nothing is computed in that case.
    pub fn correct_batch(
        &self,
        ra_hours: &[f64],
        dec_deg: &[f64],
        julian_day: &[f64],
    ) -> Result<DopplerReport, RadcorrError> {
        if ra_hours.len() != dec_deg.len() || ra_hours.len() != julian_day.len() {
            return Err(RadcorrError::InputShapeMismatch {
                ra: ra_hours.len(),
                dec: dec_deg.len(),
                julian_day: julian_day.len(),
            });
        }

        let samples: Vec<ObservationSample> = izip!(ra_hours, dec_deg, julian_day)
            .map(|(&ra, &dec, &jd)| ObservationSample::new(ra, dec, jd))
            .collect();

        Ok(self.correct_samples(&samples))
    }
}

/// Four-frame velocity corrections for parallel columns of observations.
///
/// Arguments
/// -----------------
/// * `ra_hours`, `dec_deg`, `julian_day`: see [`DopplerCorrector::correct_batch`].
/// * `observer`: observing site, `None` selects [`ObserverLocation::default`].
/// * `unit`: km/s or fraction of the speed of light.
///
/// Return
/// ----------
/// * A [`DopplerReport`] holding the 4×N velocities, the observer used and the local
///   sidereal times.
///
/// Errors
/// ----------
/// * [`RadcorrError::InputShapeMismatch`] when the three slices differ in length.
pub fn compute_velocities(
    ra_hours: &[f64],
    dec_deg: &[f64],
    julian_day: &[f64],
    observer: Option<ObserverLocation>,
    unit: VelocityUnit,
) -> Result<DopplerReport, RadcorrError> {
    let observer = observer.unwrap_or_else(|| {
        let site = ObserverLocation::default();
        debug!(
            latitude = site.latitude,
            west_longitude = site.west_longitude,
            "no observer location given, using the default site"
        );
        site
    });

    DopplerCorrector::new(DopplerConfig { observer, unit }).correct_batch(
        ra_hours,
        dec_deg,
        julian_day,
    )
}

#[cfg(test)]
mod doppler_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    /// Earth velocity stub returning fixed vectors and counting calls.
    struct FixedEarth {
        helio: Vector3<f64>,
        bary: Vector3<f64>,
        calls: Cell<usize>,
    }

    impl FixedEarth {
        fn new(helio: Vector3<f64>, bary: Vector3<f64>) -> Self {
            FixedEarth {
                helio,
                bary,
                calls: Cell::new(0),
            }
        }
    }

    impl EarthVelocity for FixedEarth {
        fn velocity(&self, _julian_day: JD, epoch: f64) -> (Vector3<f64>, Vector3<f64>) {
            assert_eq!(epoch, 2000.0);
            self.calls.set(self.calls.get() + 1);
            (self.helio, self.bary)
        }
    }

    struct FixedClock(Hour);

    impl SiderealClock for FixedClock {
        fn local_sidereal_time(&self, _julian_day: JD, _east_longitude: f64) -> Hour {
            self.0
        }
    }

    fn fixed_corrector(lst: Hour) -> DopplerCorrector<FixedEarth, FixedClock> {
        DopplerCorrector::with_collaborators(
            DopplerConfig::default(),
            FixedEarth::new(Vector3::new(10.0, -20.0, 5.0), Vector3::new(10.01, -20.02, 5.0)),
            FixedClock(lst),
        )
    }

    #[test]
    fn test_lsr_solar_velocity() {
        let v = lsr_solar_velocity();
        assert_relative_eq!(
            v,
            Vector3::new(-0.28997799618817327, -17.31726687984386, 10.001408929445372),
            epsilon = 1e-10
        );
        assert_relative_eq!(v.norm(), LSR_SOLAR_SPEED, epsilon = 1e-10);
    }

    #[test]
    fn test_combination_signs() {
        let components = VelocityComponents {
            orbit_helio: 3.0,
            orbit_bary: 2.0,
            lsr: 7.0,
            spin: 0.25,
        };
        let v = components.combine();
        assert_eq!(v.geocentric, -0.25);
        assert_eq!(v.heliocentric, -3.25);
        assert_eq!(v.barycentric, -2.25);
        assert_eq!(v.lsr, -9.25);
    }

    #[test]
    fn test_spin_vanishes_on_meridian() {
        // Hour angle zero: the rotation is perpendicular to the line of sight
        let corrector = fixed_corrector(6.0);
        let (components, lst) = corrector.components(&ObservationSample::new(6.0, 10.0, 2451545.0));
        assert_eq!(lst, 6.0);
        assert_relative_eq!(components.spin, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_spin_maximum_at_six_hours() {
        // Source on the equator, six hours east of the meridian (hour angle −6h)
        let corrector = fixed_corrector(0.0);
        let (components, _) = corrector.components(&ObservationSample::new(6.0, 0.0, 2451545.0));
        let expected = EARTH_SPIN_SPEED * (ObserverLocation::default().latitude * RADEG).cos();
        assert_relative_eq!(components.spin, expected, epsilon = 1e-12);

        let v = corrector.correct(&ObservationSample::new(6.0, 0.0, 2451545.0));
        assert_relative_eq!(v.velocities.geocentric, -expected, epsilon = 1e-12);
    }

    #[test]
    fn test_source_along_earth_motion_is_approaching() {
        let helio = Vector3::new(-17.07, -22.81, -9.89);
        let corrector = DopplerCorrector::with_collaborators(
            DopplerConfig::default(),
            FixedEarth::new(helio, helio),
            FixedClock(3.0),
        );

        let direction = helio.normalize();
        let ra_hours = direction.y.atan2(direction.x).rem_euclid(std::f64::consts::TAU) / RADH;
        let dec_deg = direction.z.asin() / RADEG;
        let sample = ObservationSample::new(ra_hours, dec_deg, 2449398.5);

        let (components, _) = corrector.components(&sample);
        assert!(components.orbit_helio > 0.0);
        assert_relative_eq!(components.orbit_helio, helio.norm(), epsilon = 1e-10);

        let v = corrector.correct(&sample).velocities;
        assert!(v.heliocentric < v.geocentric);
        assert_relative_eq!(v.heliocentric - v.geocentric, -helio.norm(), epsilon = 1e-10);
    }

    #[test]
    fn test_fraction_of_light() {
        let sample = ObservationSample::new(5.5, -5.4, 2455197.5);
        let kms = DopplerCorrector::new(DopplerConfig::default()).correct(&sample);
        let light = DopplerCorrector::new(DopplerConfig {
            unit: VelocityUnit::FractionOfLight,
            ..DopplerConfig::default()
        })
        .correct(&sample);

        for (a, b) in kms
            .velocities
            .to_array()
            .iter()
            .zip(light.velocities.to_array())
        {
            assert_relative_eq!(a / VLIGHT, b, epsilon = 1e-18);
        }
        assert_eq!(kms.lst, light.lst);
    }

    #[test]
    fn test_batch_matches_single_samples() {
        let corrector = DopplerCorrector::new(DopplerConfig::default());
        let ra = [5.5, 18.0, 12.25, 0.1];
        let dec = [-5.4, 30.0, -60.0, 85.0];
        let jd = [2455197.5, 2458849.75, 2451545.0, 2460310.125];

        let report = corrector.correct_batch(&ra, &dec, &jd).unwrap();
        assert_eq!(report.len(), 4);
        assert_eq!(report.velocities.nrows(), 4);

        for i in 0..ra.len() {
            let single = corrector.correct(&ObservationSample::new(ra[i], dec[i], jd[i]));
            assert_eq!(report.correction(i), Some(single.velocities));
            assert_eq!(report.lst[i], single.lst);
        }
        assert_eq!(report.correction(4), None);
    }

    #[test]
    fn test_length_mismatch_before_any_work() {
        let corrector = fixed_corrector(0.0);
        let err = corrector
            .correct_batch(&[1.0, 2.0], &[3.0, 4.0], &[2451545.0])
            .unwrap_err();

        assert_eq!(
            err,
            RadcorrError::InputShapeMismatch {
                ra: 2,
                dec: 2,
                julian_day: 1
            }
        );
        assert_eq!(corrector.earth.calls.get(), 0);
    }

    #[test]
    fn test_empty_batch() {
        let report = DopplerCorrector::new(DopplerConfig::default())
            .correct_batch(&[], &[], &[])
            .unwrap();
        assert!(report.is_empty());
        assert!(report.lst.is_empty());
    }

    #[test]
    fn test_config_partial_deserialization() {
        let config: DopplerConfig =
            serde_json::from_str(r#"{"unit": "FractionOfLight"}"#).unwrap();
        assert_eq!(config.observer, ObserverLocation::default());
        assert_eq!(config.unit, VelocityUnit::FractionOfLight);

        let config: DopplerConfig = serde_json::from_str(
            r#"{"observer": {"latitude": -30.2446, "west_longitude": 70.7494}}"#,
        )
        .unwrap();
        assert_relative_eq!(config.observer.latitude, -30.2446);
        assert_relative_eq!(config.observer.west_longitude, 70.7494);
        assert_eq!(config.unit, VelocityUnit::KmPerSecond);

        let config: DopplerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DopplerConfig::default());

        // An observer must give both coordinates
        let missing = serde_json::from_str::<DopplerConfig>(r#"{"observer": {"latitude": 10.0}}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = DopplerConfig {
            observer: ObserverLocation::new(-30.2446, 70.7494),
            unit: VelocityUnit::FractionOfLight,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: DopplerConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.unit, config.unit);
        assert_relative_eq!(back.observer.latitude, config.observer.latitude);
        assert_relative_eq!(back.observer.west_longitude, config.observer.west_longitude);
    }
}
