use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{Equinox, Radian, DPI, RADSEC};

/// Celestial reference frame realization whose precession constants are used.
///
/// - `FK5`: IAU 1976 constants, reference epoch J2000.0 (default).
/// - `FK4`: Newcomb constants as given by Taff (1983), reference epoch B1950.0
///   (polynomials anchored on 1900.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrecessionFrame {
    FK4,
    #[default]
    FK5,
}

impl PrecessionFrame {
    /// Epoch on which the precession polynomials are anchored.
    pub fn anchor_epoch(&self) -> Equinox {
        match *self {
            PrecessionFrame::FK4 => 1900.0,
            PrecessionFrame::FK5 => 2000.0,
        }
    }

    /// Reference epoch of the frame realization.
    pub fn reference_epoch(&self) -> Equinox {
        match *self {
            PrecessionFrame::FK4 => 1950.0,
            PrecessionFrame::FK5 => 2000.0,
        }
    }
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// This function builds a [`nalgebra::Matrix3`] representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis, counter-clockwise when
/// looking down the axis toward the origin.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in **radians**.
/// * `k`: index of the axis of rotation (`0` → X, `1` → Y, `2` → Z).
///
/// Returns
/// --------
/// * A 3×3 orthonormal matrix `R` such that the rotated vector is `x' = R · x`.
///
/// Panics
/// -------
/// Panics if `k > 2`, as only axes 0–2 are valid.
///
/// # See also
/// * [`premat`] – chains three of these rotations into a precession matrix
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Compute the three Euler precession angles (ζ, z, θ) between two equinoxes.
///
/// Arguments
/// ---------
/// * `equinox1`: original equinox, in decimal years.
/// * `equinox2`: target equinox, in decimal years.
/// * `frame`: selects the FK4 or FK5 constant set.
///
/// Returns
/// --------
/// * Tuple `(ζ, z, θ)` in **radians**.
///
/// Formula
/// -------
/// With `t = (equinox2 − equinox1) / 100` and `s = (equinox1 − anchor) / 100`, both in
/// centuries, the FK5 angles (arcseconds) are
///
/// ```text
/// ζ = t (2306.2181 + s (1.39656 + 0.0000139 s) + t (0.30188 − 0.000344 s + 0.017998 t))
/// z = t² (0.79280 + 0.000410 s + 0.000205 t) + ζ
/// θ = t (2004.3109 − s (0.8533 + 0.000217 s) + t (−0.42665 − 0.000217 s − 0.041833 t))
/// ```
///
/// and the FK4 angles follow the same layout with the Newcomb coefficients.
pub fn precession_angles(
    equinox1: Equinox,
    equinox2: Equinox,
    frame: PrecessionFrame,
) -> (Radian, Radian, Radian) {
    let t = (equinox2 - equinox1) / 100.0;
    let s = (equinox1 - frame.anchor_epoch()) / 100.0;

    let (zeta, z, theta) = match frame {
        PrecessionFrame::FK5 => {
            let zeta = t
                * (2306.2181
                    + s * (1.39656 + 0.0000139 * s)
                    + t * (0.30188 - 0.000344 * s + 0.017998 * t));
            let z = t * t * (0.79280 + 0.000410 * s + 0.000205 * t) + zeta;
            let theta = t
                * (2004.3109 - s * (0.8533 + 0.000217 * s)
                    + t * (-0.42665 - 0.000217 * s - 0.041833 * t));
            (zeta, z, theta)
        }
        PrecessionFrame::FK4 => {
            let zeta = t
                * (2304.253 + s * (1.3975 + 0.00006 * s) + t * (0.3023 - 0.00027 * s + 0.018 * t));
            let z = t * t * (0.7927 + 0.00066 * s + 0.00032 * t) + zeta;
            let theta = t
                * (2004.685 - s * (0.8533 + 0.00037 * s)
                    + t * (-0.4267 - 0.00037 * s - 0.0418 * t));
            (zeta, z, theta)
        }
    };

    (zeta * RADSEC, z * RADSEC, theta * RADSEC)
}

/// Compute the precession matrix from `equinox1` to `equinox2`.
///
/// The returned matrix maps direction cosines referred to the mean equator and equinox
/// of `equinox1` onto the mean equator and equinox of `equinox2`:
///
/// ```text
/// x₂ = P · x₁
/// ```
///
/// Method
/// ------
/// The transformation is composed of three successive rotations of the vector:
/// 1. Around Z-axis by `ζ`
/// 2. Around Y-axis by `−θ`
/// 3. Around Z-axis by `z`
///
/// so `P = R_z(z) · R_y(−θ) · R_z(ζ)`. The angles come from [`precession_angles`].
///
/// Remarks
/// -------
/// * No range validation is done. Accuracy degrades more than 2.5 centuries away from
///   the frame's reference epoch (2000 for FK5, 1950 for FK4).
/// * `premat(e, e, _)` is the identity and `premat(e2, e1, _)` is the transpose of
///   `premat(e1, e2, _)` up to floating-point rounding.
///
/// # See also
/// * [`rotmt`] – elementary rotations
/// * [`crate::precession::precess`] – applies this matrix to equatorial coordinates
pub fn premat(equinox1: Equinox, equinox2: Equinox, frame: PrecessionFrame) -> Matrix3<f64> {
    let (zeta, z, theta) = precession_angles(equinox1, equinox2, frame);

    let r1 = rotmt(zeta, 2);
    let r2 = rotmt(-theta, 1);
    let r3 = rotmt(z, 2);

    r3 * (r2 * r1)
}

/// Direction cosines `(cos δ cos α, cos δ sin α, sin δ)` of a spherical direction.
///
/// Arguments
/// ---------
/// * `ra`: right ascension in radians.
/// * `dec`: declination in radians.
pub fn direction_cosines(ra: Radian, dec: Radian) -> Vector3<f64> {
    let cos_dec = dec.cos();
    Vector3::new(cos_dec * ra.cos(), cos_dec * ra.sin(), dec.sin())
}

/// Convert a unit direction vector back to right ascension and declination.
///
/// Returns
/// --------
/// * Tuple `(α, δ)` in radians, `α ∈ [0, 2π)` and `δ ∈ [−π/2, +π/2]`.
///
/// Remarks
/// -------
/// * The z-component is clamped to `[−1, 1]` before `asin`, so round-off on vectors
///   pointing at a pole cannot produce a NaN.
/// * `atan2` keeps the quadrant; negative values are shifted by a full turn.
pub fn direction_to_radec(direction: &Vector3<f64>) -> (Radian, Radian) {
    let delta = direction.z.clamp(-1.0, 1.0).asin();

    let alpha = direction.y.atan2(direction.x);
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };

    // atan2 of a tiny negative y can round up to a full turn
    let alpha = if alpha >= DPI { alpha - DPI } else { alpha };
    (alpha, delta)
}

#[cfg(test)]
mod ref_system_test {

    use super::*;
    use approx::assert_relative_eq;

    fn assert_matrix_eq(a: &Matrix3<f64>, b: &Matrix3<f64>, tol: f64) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[(i, j)], b[(i, j)], epsilon = tol);
            }
        }
    }

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_rotmt_z_axis() {
        let r = rotmt(std::f64::consts::FRAC_PI_2, 2);
        let x = r * Vector3::x();
        assert_relative_eq!(x, Vector3::y(), epsilon = TOLERANCE);
    }

    #[test]
    #[should_panic]
    fn test_rotmt_invalid_axis() {
        rotmt(0.1, 3);
    }

    #[test]
    fn test_premat_same_epoch_is_identity() {
        for frame in [PrecessionFrame::FK4, PrecessionFrame::FK5] {
            for epoch in [1900.0, 1950.0, 1985.5, 2000.0, 2024.25] {
                let p = premat(epoch, epoch, frame);
                assert_matrix_eq(&p, &Matrix3::identity(), TOLERANCE);
            }
        }
    }

    #[test]
    fn test_premat_j2000_to_1985() {
        let ref_premat = Matrix3::new(
            0.9999933126624426,
            0.0033540984401902807,
            0.0014576193082417132,
            -0.003354098440282148,
            0.9999943749930185,
            -2.444444471771993e-06,
            -0.0014576193080303177,
            -2.444570523352004e-06,
            0.9999989376694242,
        );

        let p = premat(2000.0, 1985.0, PrecessionFrame::FK5);
        assert_matrix_eq(&p, &ref_premat, 1e-14);
    }

    #[test]
    fn test_premat_is_orthogonal() {
        let cases = [
            (2000.0, 1985.0, PrecessionFrame::FK5),
            (1900.0, 2000.0, PrecessionFrame::FK5),
            (2000.0, 2150.0, PrecessionFrame::FK5),
            (1950.0, 1975.0, PrecessionFrame::FK4),
            (1950.0, 2000.0, PrecessionFrame::FK4),
        ];

        for (e1, e2, frame) in cases {
            let p = premat(e1, e2, frame);
            assert_matrix_eq(&(p.transpose() * p), &Matrix3::identity(), TOLERANCE);
            assert_relative_eq!(p.determinant(), 1.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn test_premat_round_trip_is_identity() {
        for frame in [PrecessionFrame::FK4, PrecessionFrame::FK5] {
            let forward = premat(1950.0, 2010.0, frame);
            let backward = premat(2010.0, 1950.0, frame);
            assert_matrix_eq(&(backward * forward), &Matrix3::identity(), 1e-8);
        }
    }

    #[test]
    fn test_frames_differ() {
        let fk4 = premat(1950.0, 2000.0, PrecessionFrame::FK4);
        let fk5 = premat(1950.0, 2000.0, PrecessionFrame::FK5);
        assert!((fk4 - fk5).abs().max() > 1e-7);
    }

    #[test]
    fn test_direction_round_trip() {
        let (ra, dec) = (4.2, -0.7);
        let v = direction_cosines(ra, dec);
        assert_relative_eq!(v.norm(), 1.0, epsilon = TOLERANCE);

        let (alpha, delta) = direction_to_radec(&v);
        assert_relative_eq!(alpha, ra, epsilon = TOLERANCE);
        assert_relative_eq!(delta, dec, epsilon = TOLERANCE);
    }

    #[test]
    fn test_direction_to_radec_clamps_pole() {
        let (_, delta) = direction_to_radec(&Vector3::new(0.0, 0.0, 1.0 + 1e-15));
        assert!(!delta.is_nan());
        assert_relative_eq!(delta, std::f64::consts::FRAC_PI_2, epsilon = TOLERANCE);
    }
}
