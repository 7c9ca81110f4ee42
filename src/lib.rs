//! `emtportal` - Hospital distance resolution for volunteer EMT staff
//!
//! This library ranks the hospital directory by distance from a responder,
//! using driving routes when the routing backend is reachable and a
//! great-circle estimate when it is not. It also serves the static protocol
//! reference list over a small HTTP API.

pub mod api;
pub mod config;
pub mod directory;
pub mod distance;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::EmtPortalConfig;
pub use directory::Directory;
pub use distance::{
    DistanceError, DistanceResolver, DistanceResult, DistanceSource, GeodesicDistanceEstimator,
    OpenRouteServiceProvider, RankedDestination, RouteDistanceProvider, format_duration,
};
pub use error::EmtPortalError;
pub use models::{Coordinate, Hospital, Protocol};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EmtPortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
