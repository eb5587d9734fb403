use approx::assert_relative_eq;
use radcorr::VelocityCorrection;

pub fn assert_correction_close(actual: &VelocityCorrection, expected: [f64; 4], epsilon: f64) {
    assert_relative_eq!(actual.geocentric, expected[0], epsilon = epsilon);
    assert_relative_eq!(actual.heliocentric, expected[1], epsilon = epsilon);
    assert_relative_eq!(actual.barycentric, expected[2], epsilon = epsilon);
    assert_relative_eq!(actual.lsr, expected[3], epsilon = epsilon);
}
