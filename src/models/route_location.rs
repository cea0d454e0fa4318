//! Route Location Model
//!
//! Last known bus position and the child's home, as shown on the live map.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance using the haversine formula
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Bus and home coordinates for one child's active route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLocations {
    pub bus: GeoPoint,
    pub home: GeoPoint,
    /// Timestamp of the last GPS fix, as reported by the bus
    pub last_update: String,
}

impl RouteLocations {
    pub fn distance_to_home_km(&self) -> f64 {
        self.bus.distance_km(&self.home)
    }
}
