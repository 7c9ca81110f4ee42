use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    EmtPortalError, VERSION,
    directory::Directory,
    distance::{DistanceError, DistanceResolver, RankedDestination, RouteDistanceProvider},
    models::Protocol,
};

/// Shared context handed to every request
pub struct AppState<P> {
    pub resolver: Arc<DistanceResolver<P>>,
    pub directory: Arc<Directory>,
}

impl<P> AppState<P> {
    pub fn new(resolver: DistanceResolver<P>, directory: Directory) -> Self {
        Self {
            resolver: Arc::new(resolver),
            directory: Arc::new(directory),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            directory: Arc::clone(&self.directory),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HospitalQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProtocolQuery {
    pub category: Option<String>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// JSON error body with a matching status code
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<EmtPortalError> for ApiError {
    fn from(err: EmtPortalError) -> Self {
        let status = match &err {
            EmtPortalError::Validation { .. }
            | EmtPortalError::Distance(DistanceError::InvalidCoordinate { .. }) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router<P: RouteDistanceProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hospitals", get(get_hospitals::<P>))
        .route("/protocols", get(get_protocols::<P>))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: VERSION,
    })
}

async fn get_hospitals<P: RouteDistanceProvider + 'static>(
    State(state): State<AppState<P>>,
    query: Result<Query<HospitalQuery>, QueryRejection>,
) -> Result<Json<Vec<RankedDestination>>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| EmtPortalError::validation(rejection.body_text()))?;
    let hospitals = state.directory.hospitals().to_vec();

    let ranked = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => state
            .resolver
            .resolve_from(lat, lon, hospitals)
            .await
            .map_err(EmtPortalError::from)?,
        (None, None) => state.resolver.resolve(None, hospitals).await,
        _ => {
            return Err(EmtPortalError::validation(
                "lat and lon must be supplied together",
            )
            .into());
        }
    };

    Ok(Json(ranked))
}

async fn get_protocols<P: RouteDistanceProvider + 'static>(
    State(state): State<AppState<P>>,
    Query(query): Query<ProtocolQuery>,
) -> Json<Vec<Protocol>> {
    Json(state.directory.protocols_in(query.category.as_deref()))
}
