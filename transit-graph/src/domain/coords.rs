//! Geographic coordinates.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Error returned when parsing a `lat,lon` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// As a `geo` point (x is longitude, y is latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Great-circle distance in kilometres.
    ///
    /// ```
    /// use transit_graph::domain::Coordinates;
    ///
    /// let a = Coordinates::new(46.7784, -71.2747);
    /// assert_eq!(a.haversine_km(&a), 0.0);
    /// ```
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        Haversine.distance(self.to_point(), other.to_point()) / 1000.0
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = InvalidCoordinates;

    /// Parse `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or(InvalidCoordinates {
            reason: "expected lat,lon",
        })?;
        let latitude: f64 = lat.trim().parse().map_err(|_| InvalidCoordinates {
            reason: "latitude is not a number",
        })?;
        let longitude: f64 = lon.trim().parse().map_err(|_| InvalidCoordinates {
            reason: "longitude is not a number",
        })?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates {
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                reason: "longitude must be within -180..=180",
            });
        }

        Ok(Self::new(latitude, longitude))
    }
}
