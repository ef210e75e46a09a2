//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{
    AdvisoryRequest, AdvisoryResult, AirQualityReading, Coordinates, CurrentQuery,
    DataSourceDescriptor, ForecastPoint, ForecastQuery, HealthResponse,
};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    })
}

/// GET /v1/air-quality?lat&lon&radius_km
///
/// Current readings for the monitoring sites nearest a coordinate.
pub async fn get_air_quality(
    State(state): State<AppState>,
    Query(query): Query<CurrentQuery>,
) -> HandlerResult<Vec<AirQualityReading>> {
    Coordinates::new(query.lat, query.lon).map_err(AppError::BadRequest)?;
    if query.radius_km <= 0.0 {
        return Err(AppError::BadRequest(
            "radius_km must be positive".to_string(),
        ));
    }

    let readings = state
        .aggregator
        .fetch_current(query.lat, query.lon, query.radius_km)
        .await;
    Ok(Json(readings))
}

/// GET /v1/forecast?lat&lon
///
/// Six-step hourly forecast for a coordinate.
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> HandlerResult<Vec<ForecastPoint>> {
    Coordinates::new(query.lat, query.lon).map_err(AppError::BadRequest)?;

    let points = state.aggregator.fetch_forecast(query.lat, query.lon).await;
    Ok(Json(points))
}

/// POST /v1/advisory
///
/// Answer a free-text question about a reading. Never fails on provider
/// errors; the responder degrades internally.
pub async fn post_advisory(
    State(state): State<AppState>,
    Json(request): Json<AdvisoryRequest>,
) -> HandlerResult<AdvisoryResult> {
    if request.query.trim().is_empty() {
        return Err(AppError::BadRequest("query must not be empty".to_string()));
    }

    // Weather context is best-effort; the prompt simply omits it on failure.
    let weather = state
        .weather
        .current_weather(request.reading.lat, request.reading.lon)
        .await
        .ok()
        .flatten();

    let result = state
        .responder
        .respond(&request.query, &request.reading, weather.as_ref())
        .await;
    Ok(Json(result))
}

/// GET /v1/sources
///
/// Static metadata for the upstream data sources.
pub async fn get_sources(State(state): State<AppState>) -> Json<Vec<DataSourceDescriptor>> {
    Json(state.aggregator.data_sources())
}
