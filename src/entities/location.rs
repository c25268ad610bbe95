use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.latitude, coordinates.longitude)
    }
}

/// A stop on a tow route. Free-text addresses are geocoded by the
/// directions provider; the offline fallback needs coordinates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Waypoint {
    pub label: String,
    pub coordinates: Option<Coordinates>,
}

impl Waypoint {
    pub fn new(label: String, coordinates: Option<Coordinates>) -> Self {
        Self { label, coordinates }
    }
}
