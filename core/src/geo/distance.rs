use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Absolute latitude and longitude differences.
    pub fn axis_deltas(&self, other: &Coordinate) -> (f64, f64) {
        ((self.lat - other.lat).abs(), (self.lon - other.lon).abs())
    }

    /// Largest single-axis difference (Chebyshev distance in degree space).
    pub fn chebyshev(&self, other: &Coordinate) -> f64 {
        let (dlat, dlon) = self.axis_deltas(other);
        dlat.max(dlon)
    }

    /// Straight-line distance in degree space. No great-circle correction.
    pub fn euclidean(&self, other: &Coordinate) -> f64 {
        let (dlat, dlon) = self.axis_deltas(other);
        (dlat * dlat + dlon * dlon).sqrt()
    }
}
