use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadcorrError {
    #[error(
        "Input sequences must have equal lengths (ra: {ra}, dec: {dec}, julian day: {julian_day})"
    )]
    InputShapeMismatch {
        ra: usize,
        dec: usize,
        julian_day: usize,
    },

    #[error("Coordinate sequences must have equal lengths (ra: {ra}, dec: {dec})")]
    CoordinateShapeMismatch { ra: usize, dec: usize },

    #[error("Invalid sexagesimal angle: {0}")]
    InvalidSexagesimal(String),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),
}

impl PartialEq for RadcorrError {
    fn eq(&self, other: &Self) -> bool {
        use RadcorrError::*;
        match (self, other) {
            (
                InputShapeMismatch {
                    ra: a1,
                    dec: b1,
                    julian_day: c1,
                },
                InputShapeMismatch {
                    ra: a2,
                    dec: b2,
                    julian_day: c2,
                },
            ) => a1 == a2 && b1 == b2 && c1 == c2,

            (
                CoordinateShapeMismatch { ra: a1, dec: b1 },
                CoordinateShapeMismatch { ra: a2, dec: b2 },
            ) => a1 == a2 && b1 == b2,

            // Messages come from parsers and calendars, only the variant is compared
            (InvalidSexagesimal(_), InvalidSexagesimal(_)) => true,
            (InvalidDate(_), InvalidDate(_)) => true,

            _ => false,
        }
    }
}
