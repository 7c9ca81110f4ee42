use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;
use tracing::instrument;

use super::{DistanceError, DistanceResult, RouteDistanceProvider, round_minutes, round_tenth};
use crate::config::RoutingConfig;
use crate::error::EmtPortalError;
use crate::models::Coordinate;

const MILES_PER_METER: f64 = 0.000_621_371;
const ACCEPT_ROUTE: &str = "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

/// Driving distances from an OpenRouteService compatible backend
pub struct OpenRouteServiceProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    /// Meters
    distance: Option<f64>,
    /// Seconds
    duration: Option<f64>,
}

impl OpenRouteServiceProvider {
    pub fn new(config: &RoutingConfig) -> Result<Self, EmtPortalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("emtportal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EmtPortalError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/v2/directions/driving-car?start={}&end={}",
            self.base_url,
            origin.to_lon_lat(),
            destination.to_lon_lat()
        )
    }
}

#[async_trait]
impl RouteDistanceProvider for OpenRouteServiceProvider {
    #[instrument(skip(self))]
    async fn resolve(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DistanceResult, DistanceError> {
        tracing::debug!("Calling the routing API");
        let mut request = self
            .client
            .get(self.route_url(origin, destination))
            .header(ACCEPT, ACCEPT_ROUTE);

        if let Some(api_key) = &self.api_key {
            request = request.query(&[("api_key", api_key)]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DistanceError::routing_unavailable(format!(
                "routing backend returned {status}"
            )));
        }

        let body = response.text().await?;
        parse_route_payload(&body)
    }
}

/// Extract the first segment of the first route, refusing partial payloads
fn parse_route_payload(body: &str) -> Result<DistanceResult, DistanceError> {
    let response: DirectionsResponse = serde_json::from_str(body)?;

    let segment = response
        .features
        .first()
        .and_then(|feature| feature.properties.as_ref())
        .and_then(|properties| properties.segments.first())
        .ok_or_else(|| DistanceError::routing_unavailable("no route in response"))?;

    let (meters, seconds) = match (segment.distance, segment.duration) {
        (Some(meters), Some(seconds)) => (meters, seconds),
        _ => {
            return Err(DistanceError::routing_unavailable(
                "route segment is missing distance or duration",
            ));
        }
    };

    if !meters.is_finite() || !seconds.is_finite() || meters < 0.0 || seconds < 0.0 {
        return Err(DistanceError::routing_unavailable(
            "route segment has invalid distance or duration",
        ));
    }

    let miles = round_tenth(meters * MILES_PER_METER);
    let minutes = round_minutes(seconds / 60.0);
    Ok(DistanceResult::routed(miles, minutes))
}
