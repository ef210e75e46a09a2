//! OpenAQ ground-sensor network client.
//!
//! Queries the OpenAQ `locations` endpoint for the monitoring sites nearest
//! a coordinate. The wire shape is loosely typed upstream, so every field of
//! the response schema is optional or defaulted here; a site with missing
//! pieces is repaired with placeholders rather than dropped.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{GroundSensorProvider, SensorSite, SiteMeasurement};
use crate::api::Coordinates;
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};

const PROVIDER: &str = "openaq";

/// How many nearest sites to request from the provider.
const SITE_LIMIT: usize = 10;

/// HTTP client for the OpenAQ API.
pub struct OpenAqClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAqClient {
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            base_url: config.openaq_base_url.clone(),
        }
    }
}

#[async_trait]
impl GroundSensorProvider for OpenAqClient {
    async fn nearby_sites(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> ProviderResult<Vec<SensorSite>> {
        let radius_m = (radius_km * 1000.0) as i64;
        let url = format!(
            "{}/locations?coordinates={},{}&radius={}&limit={}&order_by=distance",
            self.base_url, lat, lon, radius_m, SITE_LIMIT
        );

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
            });
        }

        let body: LocationsResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Transport {
                    provider: PROVIDER,
                    source,
                })?;

        debug!(sites = body.results.len(), "openaq locations fetched");
        Ok(body
            .results
            .into_iter()
            .map(|raw| raw.into_site(lat, lon))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    results: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    #[serde(default)]
    id: i64,
    name: Option<String>,
    locality: Option<String>,
    city: Option<String>,
    country: Option<String>,
    coordinates: Option<RawCoordinates>,
    parameters: Option<Vec<RawParameter>>,
}

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    #[serde(default)]
    parameter: String,
    last_value: Option<f64>,
    unit: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl RawLocation {
    /// Repair missing fields with placeholders; the query coordinate stands
    /// in when the site reports no position of its own.
    fn into_site(self, query_lat: f64, query_lon: f64) -> SensorSite {
        let coordinates = self
            .coordinates
            .map(|c| Coordinates {
                latitude: c.latitude.unwrap_or(query_lat),
                longitude: c.longitude.unwrap_or(query_lon),
            })
            .unwrap_or(Coordinates {
                latitude: query_lat,
                longitude: query_lon,
            });

        SensorSite {
            id: self.id,
            name: self
                .name
                .unwrap_or_else(|| "Unknown Location".to_string()),
            locality: self
                .locality
                .or(self.city)
                .unwrap_or_else(|| "Unknown".to_string()),
            country: self.country.unwrap_or_else(|| "Unknown".to_string()),
            coordinates,
            measurements: self
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| SiteMeasurement {
                    parameter: p.parameter,
                    value: p.last_value.unwrap_or(0.0),
                    unit: p.unit.unwrap_or_else(|| "µg/m³".to_string()),
                    last_updated: p.last_updated.unwrap_or_else(Utc::now),
                })
                .collect(),
        }
    }
}
