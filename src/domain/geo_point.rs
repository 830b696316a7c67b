use crate::domain::DomainError;
use std::fmt::Display;

/// A WGS84 position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidLatitude(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidLongitude(longitude));
        }

        Ok(GeoPoint { longitude, latitude })
    }

    /// Builds a point from computed coordinates, wrapping the longitude into [-180, 180] and
    /// clamping the latitude to the poles.
    pub fn normalized(longitude: f64, latitude: f64) -> Self {
        let wrapped = if (-180.0..=180.0).contains(&longitude) {
            longitude
        } else {
            (longitude + 180.0).rem_euclid(360.0) - 180.0
        };

        GeoPoint {
            longitude: wrapped,
            latitude: latitude.clamp(-90.0, 90.0),
        }
    }

    /// Parses the `lat, lng` text of a coordinate input field. Anything that is not exactly two
    /// in-range numbers yields `None`.
    pub fn parse_lat_lng(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 2 {
            return None;
        }

        let latitude = parts[0].trim().parse::<f64>().ok()?;
        let longitude = parts[1].trim().parse::<f64>().ok()?;

        GeoPoint::new(longitude, latitude).ok()
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        GeoPoint::normalized(point.x(), point.y())
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

// Lat/lng order, the way map UIs show coordinates
impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
