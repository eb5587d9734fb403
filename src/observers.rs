use serde::{Deserialize, Serialize};

use crate::constants::{Degree, DEFAULT_SITE_LATITUDE, DEFAULT_SITE_WEST_LONGITUDE};

/// Geographic position of the observing site.
///
/// Units
/// -----
/// * `latitude`: degrees, positive toward the north.
/// * `west_longitude`: degrees, positive toward the **west** of Greenwich.
///
/// The [`Default`] site is Campbell Hall (Leuschner Observatory, Berkeley):
/// 37.8732° N, 122.2573° W.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: Degree,
    pub west_longitude: Degree,
}

impl Default for ObserverLocation {
    fn default() -> Self {
        ObserverLocation {
            latitude: DEFAULT_SITE_LATITUDE,
            west_longitude: DEFAULT_SITE_WEST_LONGITUDE,
        }
    }
}

impl ObserverLocation {
    pub fn new(latitude: Degree, west_longitude: Degree) -> Self {
        ObserverLocation {
            latitude,
            west_longitude,
        }
    }

    /// Longitude in degrees, positive toward the east.
    pub fn east_longitude(&self) -> Degree {
        -self.west_longitude
    }
}
