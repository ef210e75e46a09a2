//! Data Transfer Objects for the HTTP API.
//!
//! Most response DTOs are re-exported from the api module since they already
//! derive Serialize/Deserialize; this file adds the request shapes.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    AdvisoryResult, AirQualityReading, Coordinates, DataSourceDescriptor, ForecastPoint, Tone,
};

/// Query parameters for the current-readings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentQuery {
    pub lat: f64,
    pub lon: f64,
    /// Search radius around the coordinate (default: 50 km)
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    50.0
}

/// Query parameters for the forecast endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Request body for an advisory query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    /// The user's free-text question
    pub query: String,
    /// The reading the question is about
    pub reading: AirQualityReading,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
