use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{
    EmtPortalConfig,
    api::{self, AppState},
    directory::Directory,
    distance::{DistanceResolver, OpenRouteServiceProvider, RouteDistanceProvider},
};

/// Resolver wired to the configured routing backend
pub fn build_resolver(config: &EmtPortalConfig) -> Result<DistanceResolver<OpenRouteServiceProvider>> {
    let provider = OpenRouteServiceProvider::new(&config.routing)?;
    Ok(DistanceResolver::new(provider)
        .with_max_concurrency(config.routing.max_concurrency as usize)
        .with_request_timeout(Duration::from_secs(u64::from(config.routing.timeout_seconds))))
}

pub fn app<P: RouteDistanceProvider + 'static>(state: AppState<P>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &EmtPortalConfig, port: u16) -> Result<()> {
    let resolver = build_resolver(config)?;
    let directory = Directory::load(&config.directory)?;
    let app = app(AppState::new(resolver, directory));

    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app)
        .await
        .context("Web server terminated unexpectedly")
}
