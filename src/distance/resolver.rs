//! Ranks hospitals by distance from an origin
//!
//! Each hospital is resolved independently: the routing provider is asked
//! first and any failure falls back to the geodesic estimate for that
//! hospital alone. Work runs concurrently up to a cap and is joined before
//! ranking, so callers only ever see the complete list.

use std::cmp::Ordering;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    DistanceError, DistanceResult, GeodesicDistanceEstimator, RouteDistanceProvider,
    directions_url,
};
use crate::models::{Coordinate, Hospital};

const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// A hospital annotated with the outcome of one resolution call
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedDestination {
    #[serde(flatten)]
    pub hospital: Hospital,
    #[serde(flatten)]
    pub distance: Option<DistanceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
}

impl RankedDestination {
    fn unresolved(hospital: Hospital) -> Self {
        Self {
            hospital,
            distance: None,
            directions_url: None,
        }
    }
}

/// Resolves and ranks hospitals for a given origin
pub struct DistanceResolver<P> {
    provider: P,
    estimator: GeodesicDistanceEstimator,
    max_concurrency: usize,
    request_timeout: Option<Duration>,
}

impl<P: RouteDistanceProvider> DistanceResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            estimator: GeodesicDistanceEstimator::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: None,
        }
    }

    /// Cap on the number of routing calls in flight
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Give up on a routing call after `timeout` and use the estimate instead
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate a raw origin, then resolve.
    ///
    /// An invalid origin is the only failure that reaches the caller.
    pub async fn resolve_from(
        &self,
        latitude: f64,
        longitude: f64,
        hospitals: Vec<Hospital>,
    ) -> Result<Vec<RankedDestination>, DistanceError> {
        let origin = Coordinate::new(latitude, longitude)?;
        Ok(self.resolve(Some(origin), hospitals).await)
    }

    /// Annotate every hospital with its distance from `origin` and rank them
    /// nearest first.
    ///
    /// Without an origin the hospitals come back in their given order with no
    /// distance attached.
    pub async fn resolve(
        &self,
        origin: Option<Coordinate>,
        hospitals: Vec<Hospital>,
    ) -> Vec<RankedDestination> {
        let Some(origin) = origin else {
            return hospitals
                .into_iter()
                .map(RankedDestination::unresolved)
                .collect();
        };

        debug!("Resolving {} hospitals from {}", hospitals.len(), origin);

        // `buffered` keeps input order, which the stable sort below relies on
        let mut ranked: Vec<RankedDestination> = stream::iter(hospitals)
            .map(|hospital| self.resolve_one(origin, hospital))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        ranked.sort_by(compare_ranked);
        ranked
    }

    async fn resolve_one(&self, origin: Coordinate, hospital: Hospital) -> RankedDestination {
        let destination = match hospital.coordinate() {
            Ok(destination) => destination,
            Err(err) => {
                warn!("{}", err);
                return RankedDestination {
                    hospital,
                    distance: Some(DistanceResult::unknown()),
                    directions_url: None,
                };
            }
        };

        let distance = match self.route(origin, destination).await {
            Ok(result) => {
                debug!("Routed {}: {}", hospital.name, result.distance_text);
                result
            }
            Err(err) => {
                warn!(
                    "Driving distance for {} failed, falling back to straight-line distance: {}",
                    hospital.name, err
                );
                self.estimator.estimate(origin, destination)
            }
        };

        RankedDestination {
            hospital,
            distance: Some(distance),
            directions_url: Some(directions_url(origin, destination)),
        }
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DistanceResult, DistanceError> {
        let call = self.provider.resolve(origin, destination);
        match self.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| DistanceError::routing_unavailable("routing request timed out"))?,
            None => call.await,
        }
    }
}

/// Nearest first, unknown sentinels after everything else
fn compare_ranked(a: &RankedDestination, b: &RankedDestination) -> Ordering {
    match (&a.distance, &b.distance) {
        (Some(a), Some(b)) => a
            .is_unknown()
            .cmp(&b.is_unknown())
            .then_with(|| a.distance_miles.total_cmp(&b.distance_miles)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
