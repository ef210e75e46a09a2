//! OpenWeatherMap pollution feed and current-weather client.
//!
//! Serves three lookups: the current pollution snapshot, the hourly
//! pollution forecast, and current weather conditions. Missing numeric
//! fields default to 0 (or the documented weather placeholders) so a sparse
//! payload never fails the batch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{PollutionFeedProvider, PollutionSample, WeatherSnapshot};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};

const PROVIDER: &str = "openweather";

/// How many forecast steps the feed contributes downstream.
const FORECAST_STEPS: usize = 6;

/// HTTP client for the OpenWeatherMap API.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            base_url: config.openweather_base_url.clone(),
            api_key: config.openweather_api_key.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        let response =
            self.http
                .get(url)
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

        response
            .json()
            .await
            .map_err(|source| ProviderError::Transport {
                provider: PROVIDER,
                source,
            })
    }

    fn key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}

#[async_trait]
impl PollutionFeedProvider for OpenWeatherClient {
    async fn current_pollution(
        &self,
        lat: f64,
        lon: f64,
    ) -> ProviderResult<Option<PollutionSample>> {
        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            self.base_url,
            lat,
            lon,
            self.key()
        );
        let body: PollutionResponse = self.get_json(&url).await?;
        Ok(body.list.into_iter().next().map(RawPollutionEntry::into_sample))
    }

    async fn pollution_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> ProviderResult<Vec<PollutionSample>> {
        let url = format!(
            "{}/air_pollution/forecast?lat={}&lon={}&appid={}",
            self.base_url,
            lat,
            lon,
            self.key()
        );
        let body: PollutionResponse = self.get_json(&url).await?;
        debug!(steps = body.list.len(), "pollution forecast fetched");
        Ok(body
            .list
            .into_iter()
            .take(FORECAST_STEPS)
            .map(RawPollutionEntry::into_sample)
            .collect())
    }

    async fn current_weather(&self, lat: f64, lon: f64) -> ProviderResult<Option<WeatherSnapshot>> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            lat,
            lon,
            self.key()
        );
        let body: WeatherResponse = self.get_json(&url).await?;
        Ok(Some(body.into_snapshot()))
    }
}

#[derive(Debug, Deserialize)]
struct PollutionResponse {
    #[serde(default)]
    list: Vec<RawPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct RawPollutionEntry {
    #[serde(default)]
    dt: i64,
    main: Option<RawPollutionMain>,
    components: Option<RawComponents>,
}

#[derive(Debug, Deserialize)]
struct RawPollutionMain {
    #[serde(default = "default_coarse_aqi")]
    aqi: i64,
}

fn default_coarse_aqi() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
struct RawComponents {
    #[serde(default)]
    co: f64,
    #[serde(default)]
    no: f64,
    #[serde(default)]
    no2: f64,
    #[serde(default)]
    o3: f64,
    #[serde(default)]
    so2: f64,
    #[serde(default)]
    pm2_5: f64,
    #[serde(default)]
    pm10: f64,
    #[serde(default)]
    nh3: f64,
}

impl RawPollutionEntry {
    fn into_sample(self) -> PollutionSample {
        let components = self.components.unwrap_or_default();
        PollutionSample {
            aqi: self.main.map(|m| m.aqi).unwrap_or(1),
            co: components.co,
            no: components.no,
            no2: components.no2,
            o3: components.o3,
            so2: components.so2,
            pm2_5: components.pm2_5,
            pm10: components.pm10,
            nh3: components.nh3,
            timestamp: DateTime::<Utc>::from_timestamp(self.dt, 0).unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<RawWeatherMain>,
    wind: Option<RawWind>,
    #[serde(default)]
    weather: Vec<RawWeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct RawWeatherMain {
    temp: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: Option<f64>,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWeatherCondition {
    description: Option<String>,
    icon: Option<String>,
}

impl WeatherResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let main = self.main;
        let wind = self.wind;
        let condition = self.weather.into_iter().next();
        WeatherSnapshot {
            temperature_c: main.as_ref().and_then(|m| m.temp).unwrap_or(25.0),
            humidity_pct: main.as_ref().and_then(|m| m.humidity).unwrap_or(60.0),
            wind_speed_ms: wind.as_ref().and_then(|w| w.speed).unwrap_or(5.0),
            wind_direction_deg: wind.as_ref().and_then(|w| w.deg).unwrap_or(0.0),
            pressure_hpa: main.as_ref().and_then(|m| m.pressure).unwrap_or(1013.0),
            description: condition
                .as_ref()
                .and_then(|c| c.description.clone())
                .unwrap_or_else(|| "Clear sky".to_string()),
            icon: condition
                .and_then(|c| c.icon)
                .unwrap_or_else(|| "01d".to_string()),
            timestamp: Utc::now(),
        }
    }
}
