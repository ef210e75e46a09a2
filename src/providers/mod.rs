//! External data provider seams.
//!
//! Each upstream service the backend consumes sits behind an async trait so
//! the aggregation and advisory services can be exercised against test
//! doubles. The concrete HTTP clients live in the submodules:
//!
//! - [`openaq`]: ground-sensor network (OpenAQ)
//! - [`satellite`]: satellite/reanalysis column lookup (TEMPO / MERRA-2)
//! - [`openweather`]: weather-service pollution feed and current weather
//! - [`gemini`]: generative text backend
//!
//! Provider response shapes are loosely typed upstream; the clients validate
//! and default at this boundary so the rest of the system sees only the
//! strict value types defined here.

pub mod gemini;
pub mod openaq;
pub mod openweather;
pub mod satellite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Coordinates;
use crate::error::ProviderResult;
use crate::models::{Pollutant, ProviderReading, SourceId};

/// One parameter reported by a ground monitoring site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeasurement {
    /// Provider parameter name (`pm25`, `no2`, ...)
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub last_updated: DateTime<Utc>,
}

/// A ground monitoring site with its latest measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSite {
    pub id: i64,
    pub name: String,
    pub locality: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub measurements: Vec<SiteMeasurement>,
}

impl SensorSite {
    /// Lower this site's measurements into normalizer input.
    ///
    /// Unrecognized parameter names are dropped here rather than failing the
    /// site.
    pub fn provider_readings(&self) -> Vec<ProviderReading> {
        self.measurements
            .iter()
            .filter_map(|m| {
                Pollutant::parse(&m.parameter).map(|parameter| ProviderReading {
                    parameter,
                    value: m.value,
                    unit: m.unit.clone(),
                    observed_at: m.last_updated,
                    source: SourceId::GroundSensor,
                })
            })
            .collect()
    }
}

/// Which satellite/reanalysis product a sample came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatelliteSource {
    /// NASA TEMPO near-real-time tropospheric observations
    Tempo,
    /// MERRA-2 atmospheric reanalysis
    Merra2,
}

impl SatelliteSource {
    /// Map the product onto the normalizer's source vocabulary.
    pub fn source_id(self) -> SourceId {
        match self {
            SatelliteSource::Tempo => SourceId::Satellite,
            SatelliteSource::Merra2 => SourceId::Reanalysis,
        }
    }
}

/// Column concentrations retrieved for one coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatelliteSample {
    pub latitude: f64,
    pub longitude: f64,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub source: SatelliteSource,
}

impl SatelliteSample {
    /// Lower this sample into normalizer input.
    pub fn provider_readings(&self) -> Vec<ProviderReading> {
        let source = self.source.source_id();
        [
            (Pollutant::No2, self.no2),
            (Pollutant::O3, self.o3),
            (Pollutant::Co, self.co),
        ]
        .into_iter()
        .filter_map(|(parameter, value)| {
            value.map(|value| ProviderReading {
                parameter,
                value,
                unit: "µg/m³".to_string(),
                observed_at: self.timestamp,
                source,
            })
        })
        .collect()
    }
}

/// One timestamped reading from the weather-service pollution feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutionSample {
    /// Provider's own 1–5 coarse index (not the derived AQI)
    pub aqi: i64,
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
    pub timestamp: DateTime<Utc>,
}

/// Current weather conditions used as advisory context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub wind_direction_deg: f64,
    pub pressure_hpa: f64,
    pub description: String,
    pub icon: String,
    pub timestamp: DateTime<Utc>,
}

/// Ground-sensor network query.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait GroundSensorProvider: Send + Sync {
    /// Fetch the nearest reporting sites around a coordinate.
    ///
    /// Sites are returned in provider distance order; the aggregator bounds
    /// how many it keeps.
    async fn nearby_sites(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> ProviderResult<Vec<SensorSite>>;
}

/// Satellite/reanalysis column lookup for a single coordinate.
#[async_trait]
pub trait SatelliteProvider: Send + Sync {
    /// Retrieve column concentrations for a coordinate.
    ///
    /// `Ok(None)` means the provider answered but has no data for the
    /// coordinate; errors mean the provider itself was unreachable.
    async fn column_lookup(&self, lat: f64, lon: f64) -> ProviderResult<Option<SatelliteSample>>;
}

/// Weather-service pollution feed and current-weather lookup.
#[async_trait]
pub trait PollutionFeedProvider: Send + Sync {
    /// Current pollution snapshot for a coordinate.
    async fn current_pollution(&self, lat: f64, lon: f64)
        -> ProviderResult<Option<PollutionSample>>;

    /// Hourly pollution forecast for a coordinate.
    async fn pollution_forecast(&self, lat: f64, lon: f64)
        -> ProviderResult<Vec<PollutionSample>>;

    /// Current weather conditions for a coordinate.
    async fn current_weather(&self, lat: f64, lon: f64) -> ProviderResult<Option<WeatherSnapshot>>;
}

/// Generative text backend for the advisory responder.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate a reply for a fully-constructed prompt.
    ///
    /// `Ok(None)` means the backend answered without usable text; the
    /// responder treats both `None` and errors as fallback triggers.
    async fn generate(&self, prompt: &str) -> ProviderResult<Option<String>>;
}
