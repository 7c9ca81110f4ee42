//! Hospital distance resolution
//!
//! Turns an origin and a set of hospitals into a ranked list:
//! - Route: driving distance from an external routing backend
//! - Geodesic: great-circle estimate used when routing is unavailable
//! - Resolver: concurrent per-hospital resolution, fallback and ranking

pub mod directions;
pub mod error;
pub mod geodesic;
pub mod resolver;
pub mod route;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

pub use directions::directions_url;
pub use error::DistanceError;
pub use geodesic::GeodesicDistanceEstimator;
pub use resolver::{DistanceResolver, RankedDestination};
pub use route::OpenRouteServiceProvider;

/// Distance reported for a destination that cannot be resolved
pub const SENTINEL_MILES: f64 = 999.0;
/// Duration reported for a destination that cannot be resolved
pub const SENTINEL_MINUTES: u32 = 999;
const UNKNOWN_TEXT: &str = "Unknown";

/// Where a distance came from
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSource {
    /// Driving route from the routing backend
    Routed,
    /// Great-circle estimate
    Estimated,
    /// Destination could not be located
    Unknown,
}

/// Distance and travel time for one destination, valid for one resolution call
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult {
    /// Miles, one decimal place
    #[serde(rename = "calculatedDistance")]
    pub distance_miles: f64,
    /// Whole minutes
    #[serde(rename = "calculatedDuration")]
    pub duration_minutes: u32,
    #[serde(rename = "distance")]
    pub distance_text: String,
    #[serde(rename = "travelTime")]
    pub duration_text: String,
    pub source: DistanceSource,
}

impl DistanceResult {
    /// A routed result, displayed without the estimate marker
    #[must_use]
    pub fn routed(distance_miles: f64, duration_minutes: u32) -> Self {
        Self {
            distance_miles,
            duration_minutes,
            distance_text: format!("{distance_miles} miles"),
            duration_text: format_duration(f64::from(duration_minutes)),
            source: DistanceSource::Routed,
        }
    }

    /// An estimated result, displayed with a leading `~`
    #[must_use]
    pub fn estimated(distance_miles: f64, duration_minutes: u32) -> Self {
        Self {
            distance_miles,
            duration_minutes,
            distance_text: format!("~{distance_miles} miles"),
            duration_text: format_duration(f64::from(duration_minutes)),
            source: DistanceSource::Estimated,
        }
    }

    /// The 999/"Unknown" placeholder for destinations without coordinates
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            distance_miles: SENTINEL_MILES,
            duration_minutes: SENTINEL_MINUTES,
            distance_text: UNKNOWN_TEXT.to_string(),
            duration_text: UNKNOWN_TEXT.to_string(),
            source: DistanceSource::Unknown,
        }
    }

    #[must_use]
    pub fn is_estimate(&self) -> bool {
        self.source == DistanceSource::Estimated
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.source == DistanceSource::Unknown
    }
}

/// Source of driving distances between two coordinates
#[async_trait]
pub trait RouteDistanceProvider: Send + Sync {
    /// Resolve the driving distance from `origin` to `destination`.
    ///
    /// Every failure is reported as [`DistanceError::RoutingUnavailable`].
    async fn resolve(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DistanceResult, DistanceError>;
}

/// Render a travel duration for display
#[must_use]
pub fn format_duration(minutes: f64) -> String {
    if minutes < 1.0 {
        "< 1 min".to_string()
    } else if minutes < 60.0 {
        format!("{minutes} min")
    } else {
        let hours = (minutes / 60.0).floor();
        let remaining = minutes % 60.0;
        format!("{hours}h {remaining}m")
    }
}

/// Round to one decimal place
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to the nearest whole minute
pub(crate) fn round_minutes(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
