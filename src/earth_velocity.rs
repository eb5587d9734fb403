//! # Heliocentric and barycentric velocity of the Earth
//!
//! The orbital part of the radial-velocity correction needs the velocity of the Earth
//! with respect to the Sun and to the Solar System barycenter. This module defines the
//! [`EarthVelocity`] seam consumed by [`crate::doppler::DopplerCorrector`] and ships the
//! [`Stumpff`] implementation, an analytical series that needs no ephemeris file.
//!
//! ## Frames & units
//!
//! - Output vectors are Cartesian, **km/s**, referred to the **mean equator and equinox**
//!   of the requested epoch (the same frame as J2000 direction cosines when the epoch is 2000).
//! - An epoch of `0.0` keeps the mean equator and equinox **of date**.
//!
//! ## Accuracy
//!
//! The Stumpff (1980) series reaches about 42 cm/s for the heliocentric velocity and
//! better for the barycentric one, over the years 1900–2100. The precession of the
//! result uses the FK4 constants, as in the original formulation.
//!
//! ## References
//! * P. Stumpff, *Astron. Astrophys. Suppl. Ser.* 41, 1–8 (1980).

use nalgebra::Vector3;

use crate::constants::{Equinox, AU_STUMPFF, DPI, JD};
use crate::ref_system::{premat, PrecessionFrame};

/// Velocity of the Earth at a given instant.
///
/// Implementors must be pure functions of `(julian_day, epoch)`.
pub trait EarthVelocity {
    /// Arguments
    /// ---------
    /// * `julian_day`: Julian ephemeris date.
    /// * `epoch`: equinox of the output frame in decimal years, `0.0` for "of date".
    ///
    /// Returns
    /// --------
    /// * `(heliocentric, barycentric)` velocity vectors in km/s.
    fn velocity(&self, julian_day: JD, epoch: Equinox) -> (Vector3<f64>, Vector3<f64>);
}

/// Stumpff (1980) series for the Earth velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stumpff;

/// Julian date of 1900 January 0.5 (origin of the series)
const DCTO: f64 = 2415020.0;
/// Days in a Julian century
const DCJUL: f64 = 36525.0;
/// Offset of the Besselian year start, in days
const DCBES: f64 = 0.313;
/// Days in a tropical year
const DCTROP: f64 = 365.24219572;

/// Fast changing elements: mean longitude of the Earth, then mean anomaly of the
/// Earth and mean longitudes of the Moon, the Moon's node argument, Venus, Mars,
/// Jupiter and Saturn. Each row holds `(c0, c1, c2)` of `c0 + c1·T + c2·T²`.
const DCFEL: [[f64; 3]; 8] = [
    [1.7400353e00, 6.2833195099091e02, 5.2796e-6],
    [6.2565836e00, 6.2830194572674e02, -2.6180e-6],
    [4.7199666e00, 8.3997091449254e03, -1.9780e-5],
    [1.9636505e-1, 8.4334662911720e03, -5.6044e-5],
    [4.1547339e00, 5.2993466764997e01, 5.8845e-6],
    [4.6524223e00, 2.1354275911213e01, 5.6797e-6],
    [4.2620486e00, 7.5025342197656e00, 5.5317e-6],
    [1.4740694e00, 3.8377331909193e00, 5.6093e-6],
];

/// Mean obliquity of the ecliptic
const DCEPS: [f64; 3] = [4.093198e-1, -2.271110e-4, -2.860401e-8];

/// Slowly changing elements: eccentricity of the Earth, then longitudes of perihelion,
/// eccentricities and inclinations (or node terms) of Venus, Mars, Jupiter and Saturn.
const CCSEL: [[f64; 3]; 17] = [
    [1.675104e-2, -4.179579e-5, -1.260516e-7],
    [2.220221e-1, 2.809917e-2, 1.852532e-5],
    [1.589963e00, 3.418075e-2, 1.430200e-5],
    [2.994089e00, 2.590824e-2, 4.155840e-6],
    [8.155457e-1, 2.486352e-2, 6.836840e-6],
    [1.735614e00, 1.763719e-2, 6.370440e-6],
    [1.968564e00, 1.524020e-2, -2.517152e-6],
    [1.282417e00, 8.703393e-3, 2.289292e-5],
    [2.280820e00, 1.918010e-2, 4.484520e-6],
    [4.833473e-2, 1.641773e-4, -4.654200e-7],
    [5.589232e-2, -3.455092e-4, -7.388560e-7],
    [4.634443e-2, -2.658234e-5, 7.757000e-8],
    [8.997041e-3, 6.329728e-6, -1.939256e-9],
    [2.284178e-2, -9.941590e-5, 6.787400e-8],
    [4.350267e-2, -6.839749e-5, -2.714956e-7],
    [1.348204e-2, 1.091504e-5, 6.903760e-7],
    [3.106570e-2, -1.665665e-4, -1.590188e-7],
];

/// Arguments of the short-period planetary perturbations, `(c0, c1)` of `c0 + c1·T`
const DCARGS: [[f64; 2]; 15] = [
    [5.0974222e0, -7.8604195454652e2],
    [3.9584962e0, -5.7533848094674e2],
    [1.6338070e0, -1.1506769618935e3],
    [2.5487111e0, -3.9302097727326e2],
    [4.9255514e0, -5.8849265665348e2],
    [1.3363463e0, -5.5076098609303e2],
    [1.6072053e0, -5.2237501616674e2],
    [1.3629480e0, -1.1790629318198e3],
    [5.5657014e0, -1.0977134971135e3],
    [5.0708205e0, -1.5774000881978e2],
    [3.9318944e0, 5.2963464780000e1],
    [4.8989497e0, 3.9809289073258e1],
    [1.3097446e0, 7.7540959633708e1],
    [3.5147141e0, 7.9618578146517e1],
    [3.5413158e0, -5.4868336758022e2],
];

/// Amplitudes of the short-period perturbations: longitude (cos, sin), radius
/// (cos, sin) and the rate factor used by the first eleven terms.
const CCAMPS: [[f64; 5]; 15] = [
    [-2.279594e-5, 1.407414e-5, 8.273188e-6, 1.340565e-5, -2.490817e-7],
    [-3.494537e-5, 2.860401e-7, 1.289448e-7, 1.627237e-5, -1.823138e-7],
    [6.593466e-7, 1.322572e-5, 9.258695e-6, -4.674248e-7, -3.646275e-7],
    [1.140767e-5, -2.049792e-5, -4.747930e-6, -2.638763e-6, -1.245408e-7],
    [9.516893e-6, -2.748894e-6, -1.319381e-6, -4.549908e-6, -1.864821e-7],
    [7.310990e-6, -1.924710e-6, -8.772849e-7, -3.334143e-6, -1.745256e-7],
    [-2.603449e-6, 7.359472e-6, 3.168357e-6, 1.119056e-6, -1.655307e-7],
    [-3.228859e-6, 1.308997e-7, 1.013137e-7, 2.403899e-6, -3.736225e-7],
    [3.442177e-7, 2.671323e-6, 1.832858e-6, -2.394688e-7, -3.478444e-7],
    [8.702406e-6, -8.421214e-6, -1.372341e-6, -1.455234e-6, -4.998479e-8],
    [-1.488378e-6, -1.251789e-5, 5.226868e-7, -2.049301e-7, 0.0],
    [-8.043059e-6, -2.991300e-6, 1.473654e-7, -3.154542e-7, 0.0],
    [3.699128e-6, -3.316126e-6, 2.901257e-7, 3.407826e-7, 0.0],
    [2.550120e-6, -1.241123e-6, 9.901116e-8, 2.210482e-7, 0.0],
    [-6.351059e-7, 2.341650e-6, 1.061492e-6, 2.878231e-7, 0.0],
];

/// Secular perturbations in longitude: amplitude, then `(c0, c1)` of the argument
const CCSEC: [[f64; 3]; 4] = [
    [1.289600e-6, 5.550147e-1, 2.076942e00],
    [3.102810e-5, 4.035027e00, 3.525565e-1],
    [9.124190e-6, 9.990265e-1, 2.622706e00],
    [9.793240e-7, 5.508259e00, 1.559103e01],
];
const CCSEC3: f64 = -7.757020e-8;

/// Sidereal rate in longitude
const DCSLD: f64 = 1.990987e-7;
/// Sidereal rate in mean anomaly
const CCSGD: f64 = 1.990969e-7;

/// Lunar contribution
const CCKM: f64 = 3.122140e-5;
const CCMLD: f64 = 2.661699e-6;
const CCFDI: f64 = 2.399485e-7;

/// Arguments of the perturbations of the motion of the Moon
const DCARGM: [[f64; 2]; 3] = [
    [5.1679830e0, 8.3286911095275e3],
    [5.4913150e0, -7.2140632838100e3],
    [5.9598530e0, 1.5542754389685e4],
];

/// Amplitudes of the perturbations of the Moon
const CCAMPM: [[f64; 4]; 3] = [
    [1.097594e-1, 2.896773e-7, 5.450474e-2, 1.438491e-7],
    [-2.223581e-2, 5.083103e-8, 1.002548e-2, -2.291823e-8],
    [1.148966e-2, 5.658888e-8, 8.249439e-3, 4.063015e-8],
];

/// a·m·dl/dt of Venus, Mars, Jupiter and Saturn
const CCPAMV: [f64; 4] = [8.326827e-11, 1.843484e-11, 1.988712e-12, 1.881276e-12];
/// 1 − mass(Earth + Moon)
const DC1MME: f64 = 0.99999696;

/// Evaluate `c0 + c1·T + c2·T²` reduced modulo 2π (sign follows the dividend).
#[inline]
fn element(c: &[f64; 3], dt: f64) -> f64 {
    (c[0] + dt * (c[1] + dt * c[2])) % DPI
}

impl Stumpff {
    /// Heliocentric and barycentric velocity of the Earth in AU/day, referred to the
    /// mean equator and equinox of date.
    fn velocity_of_date(&self, julian_day: JD) -> (Vector3<f64>, Vector3<f64>) {
        let dt = (julian_day - DCTO) / DCJUL;

        let dml = element(&DCFEL[0], dt);
        let mut forbel = [0.0; 7];
        for (k, f) in forbel.iter_mut().enumerate() {
            *f = element(&DCFEL[k + 1], dt);
        }
        let g = forbel[0];

        let deps = element(&DCEPS, dt);
        let mut sorbel = [0.0; 17];
        for (k, s) in sorbel.iter_mut().enumerate() {
            *s = element(&CCSEL[k], dt);
        }
        let e = sorbel[0];

        // Secular perturbations in longitude
        let sn: [f64; 4] = CCSEC.map(|c| ((c[1] + dt * c[2]) % DPI).sin());

        // Periodic perturbations of the Earth-Moon barycenter
        let mut pertl = CCSEC
            .iter()
            .zip(&sn)
            .map(|(c, s)| c[0] * s)
            .sum::<f64>()
            + dt * CCSEC3 * sn[2];
        let mut pertld = 0.0;
        let mut pertr = 0.0;
        let mut pertrd = 0.0;
        for (k, (args, amp)) in DCARGS.iter().zip(&CCAMPS).enumerate() {
            let a = (args[0] + dt * args[1]) % DPI;
            let (sina, cosa) = a.sin_cos();
            pertl += amp[0] * cosa + amp[1] * sina;
            pertr += amp[2] * cosa + amp[3] * sina;
            if k < 11 {
                pertld += (amp[1] * cosa - amp[0] * sina) * amp[4];
                pertrd += (amp[3] * cosa - amp[2] * sina) * amp[4];
            }
        }

        // Elliptic part of the motion of the Earth-Moon barycenter
        let phi = (e * e / 4.0)
            * (((8.0 / e) - e) * g.sin() + 5.0 * (2.0 * g).sin() + (13.0 / 3.0) * e * (3.0 * g).sin());
        let f = g + phi;
        let (sinf, cosf) = f.sin_cos();
        let dpsi = (1.0 - e * e) / (1.0 + e * cosf);
        let phid = 2.0 * e * CCSGD * ((1.0 + 1.5 * e * e) * cosf + e * (1.25 - 0.5 * sinf * sinf));
        let psid = CCSGD * e * sinf / (1.0 - e * e).sqrt();

        // Perturbed heliocentric motion of the Earth-Moon barycenter
        let d1pdro = 1.0 + pertr;
        let drd = d1pdro * (psid + dpsi * pertrd);
        let drld = d1pdro * dpsi * (DCSLD + phid + pertld);
        let dtl = (dml + phi + pertl) % DPI;
        let (dsinls, dcosls) = dtl.sin_cos();
        let mut dxhd = drd * dcosls - drld * dsinls;
        let mut dyhd = drd * dsinls + drld * dcosls;

        // Eccentricity, evection and variation of the geocentric motion of the Moon
        let mut pertl = 0.0;
        let mut pertld = 0.0;
        let mut pertp = 0.0;
        let mut pertpd = 0.0;
        for (args, amp) in DCARGM.iter().zip(&CCAMPM) {
            let a = (args[0] + dt * args[1]) % DPI;
            let (sina, cosa) = a.sin_cos();
            pertl += amp[0] * sina;
            pertld += amp[1] * cosa;
            pertp += amp[2] * cosa;
            pertpd -= amp[3] * sina;
        }

        // Heliocentric motion of the Earth
        let tl = forbel[1] + pertl;
        let (sinlm, coslm) = tl.sin_cos();
        let sigma = CCKM / (1.0 + pertp);
        let a = sigma * (CCMLD + pertld);
        let b = sigma * pertpd;
        dxhd += a * sinlm + b * coslm;
        dyhd += -a * coslm + b * sinlm;
        let dzhd = -sigma * CCFDI * forbel[2].cos();

        // Barycentric motion of the Earth
        let mut dxbd = dxhd * DC1MME;
        let mut dybd = dyhd * DC1MME;
        let mut dzbd = dzhd * DC1MME;
        for (k, pamv) in CCPAMV.iter().enumerate() {
            let plon = forbel[k + 3];
            let pomg = sorbel[k + 1];
            let pecc = sorbel[k + 9];
            let tl = (plon + 2.0 * pecc * (plon - pomg).sin()) % DPI;
            dxbd += pamv * (tl.sin() + pecc * pomg.sin());
            dybd -= pamv * (tl.cos() + pecc * pomg.cos());
            dzbd -= pamv * sorbel[k + 13] * (plon - sorbel[k + 5]).cos();
        }

        // Ecliptic of date → mean equator of date
        let (dsinep, dcosep) = deps.sin_cos();
        let helio = Vector3::new(
            dxhd,
            dcosep * dyhd - dsinep * dzhd,
            dsinep * dyhd + dcosep * dzhd,
        );
        let bary = Vector3::new(
            dxbd,
            dcosep * dybd - dsinep * dzbd,
            dsinep * dybd + dcosep * dzbd,
        );

        (helio, bary)
    }
}

impl EarthVelocity for Stumpff {
    fn velocity(&self, julian_day: JD, epoch: Equinox) -> (Vector3<f64>, Vector3<f64>) {
        let (helio, bary) = self.velocity_of_date(julian_day);

        if epoch == 0.0 {
            return (helio * AU_STUMPFF, bary * AU_STUMPFF);
        }

        // Besselian epoch of the date, then general precession to the requested equinox
        let epoch_of_date = (julian_day - DCTO - DCBES) / DCTROP + 1900.0;
        let prema = premat(epoch_of_date, epoch, PrecessionFrame::FK4);

        (prema * helio * AU_STUMPFF, prema * bary * AU_STUMPFF)
    }
}
