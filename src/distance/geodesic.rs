//! Great-circle fallback for when no driving route is available

use super::{DistanceResult, round_minutes, round_tenth};
use crate::models::Coordinate;

/// Earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Ambulance average speed used for the travel time estimate
const AVERAGE_SPEED_MPH: f64 = 35.0;

/// Offline distance and travel time estimate
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicDistanceEstimator;

impl GeodesicDistanceEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Estimate distance and travel time between two coordinates
    #[must_use]
    pub fn estimate(&self, origin: Coordinate, destination: Coordinate) -> DistanceResult {
        let miles = round_tenth(haversine_miles(origin, destination));
        let minutes = round_minutes(miles / AVERAGE_SPEED_MPH * 60.0);
        DistanceResult::estimated(miles, minutes)
    }
}

/// Unrounded haversine distance in miles
#[must_use]
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // antipodal points can push `a` a hair past 1
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}
