//! Coordinate model for validated geographic positions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceError;

/// A validated (latitude, longitude) pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude in decimal degrees, within [-90, 90]
    latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DistanceError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DistanceError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(DistanceError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Build a coordinate from a `[lat, lon]` pair as found in directory content
    pub fn from_pair(pair: &[f64]) -> Result<Self, DistanceError> {
        match pair {
            [latitude, longitude] => Self::new(*latitude, *longitude),
            _ => Err(DistanceError::InvalidCoordinate {
                latitude: pair.first().copied().unwrap_or(f64::NAN),
                longitude: pair.get(1).copied().unwrap_or(f64::NAN),
            }),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Format as `lat,lon`, the order used by map links
    #[must_use]
    pub fn to_lat_lon(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Format as `lon,lat`, the order expected by the routing backend
    #[must_use]
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
