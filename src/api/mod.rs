//! API handlers for the laptop catalog REST endpoints

pub mod health;
pub mod laptops;
pub mod openapi;

use std::time::Duration;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{context::RequestContext, error::AppError, AppState};

/// Header carrying the client's deadline, in milliseconds from receipt
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Extracts the request's cancellation context.
///
/// The deadline comes from `x-request-timeout-ms` when present, otherwise from
/// `server.request_timeout_ms`.
#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(REQUEST_TIMEOUT_HEADER)
            .map(|value| {
                value
                    .to_str()
                    .ok()
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .ok_or_else(|| {
                        AppError::BadRequest(format!("Invalid {} header", REQUEST_TIMEOUT_HEADER))
                    })
            })
            .transpose()?;

        let timeout = match header {
            Some(ms) => Some(Duration::from_millis(ms)),
            None => state.config.server.request_timeout(),
        };

        Ok(match timeout {
            Some(timeout) => RequestContext::with_timeout(timeout),
            None => RequestContext::new(),
        })
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Laptops
        .route("/laptops", post(laptops::create_laptop))
        .route("/laptops/search", post(laptops::search_laptops))
        .route("/laptops/:id", get(laptops::get_laptop))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
