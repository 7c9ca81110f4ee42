use thiserror::Error;

/// Errors raised while resolving a distance
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistanceError {
    #[error("Invalid coordinate: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Any failure of the routing backend. Callers fall back to an estimate.
    #[error("Routing service unavailable: {reason}")]
    RoutingUnavailable { reason: String },

    #[error("Destination has no usable coordinates: {name}")]
    UnresolvableDestination { name: String },
}

impl DistanceError {
    pub fn routing_unavailable<S: Into<String>>(reason: S) -> Self {
        Self::RoutingUnavailable {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for DistanceError {
    fn from(err: reqwest::Error) -> Self {
        DistanceError::routing_unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for DistanceError {
    fn from(err: serde_json::Error) -> Self {
        DistanceError::routing_unavailable(format!("malformed route payload: {err}"))
    }
}
