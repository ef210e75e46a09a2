//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types shared with the frontend.
//! All types derive Serialize/Deserialize for JSON serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::aqi;

/// Geographic coordinate pair (latitude, longitude).
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A normalized, source-agnostic pollutant snapshot for one location.
///
/// The `aqi` field is always derived from the pollutant concentrations via
/// [`aqi::compute_aqi`]; it is never set independently. Construct readings
/// through [`AirQualityReading::from_pollutants`] to preserve that invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirQualityReading {
    pub lat: f64,
    pub lon: f64,
    /// PM2.5 concentration in µg/m³
    pub pm25: f64,
    /// NO₂ concentration in µg/m³
    pub no2: f64,
    /// O₃ concentration in µg/m³
    pub o3: f64,
    /// Derived air-quality index
    pub aqi: i32,
    pub timestamp: DateTime<Utc>,
    /// Human-readable location label
    pub location: String,
}

impl AirQualityReading {
    /// Build a reading from raw pollutant concentrations, deriving the AQI.
    pub fn from_pollutants(
        lat: f64,
        lon: f64,
        pm25: f64,
        no2: f64,
        o3: f64,
        timestamp: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            lat,
            lon,
            pm25,
            no2,
            o3,
            aqi: aqi::compute_aqi(pm25, no2, o3),
            timestamp,
            location: location.into(),
        }
    }

    /// True when no tracked pollutant carries a usable value.
    pub fn is_empty(&self) -> bool {
        self.pm25 == 0.0 && self.no2 == 0.0 && self.o3 == 0.0
    }
}

/// One step of a short-horizon forecast.
///
/// Later steps carry lower confidence. As with [`AirQualityReading`], the
/// `aqi` field is recomputed from the step's own pollutant values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub pm25: f64,
    pub no2: f64,
    pub o3: f64,
    pub aqi: i32,
    /// Forecast confidence in [0, 1]
    pub confidence: f64,
}

impl ForecastPoint {
    /// Build a forecast step from raw pollutant concentrations, deriving the AQI.
    pub fn from_pollutants(
        timestamp: DateTime<Utc>,
        pm25: f64,
        no2: f64,
        o3: f64,
        confidence: f64,
    ) -> Self {
        Self {
            timestamp,
            pm25,
            no2,
            o3,
            aqi: aqi::compute_aqi(pm25, no2, o3),
            confidence,
        }
    }
}

/// Severity tone attached to an advisory reply.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Calm,
    Warning,
    Urgent,
    Positive,
}

/// Reply from the advisory responder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub reply_text: String,
    pub tone: Tone,
    /// Responder confidence in [0, 1]
    pub confidence: f64,
    /// Data sources backing the reply, in citation order
    pub sources: Vec<String>,
    /// Optional map area the frontend should highlight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_area: Option<Coordinates>,
}

/// Static metadata describing one upstream data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceDescriptor {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    /// Publisher-stated confidence in [0, 1]
    pub confidence: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(9.9312, 76.2673).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(-91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, 181.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_reading_derives_aqi() {
        let reading = AirQualityReading::from_pollutants(
            9.9312,
            76.2673,
            82.0,
            20.0,
            45.0,
            Utc::now(),
            "Kochi City Center",
        );
        assert_eq!(reading.aqi, aqi::compute_aqi(82.0, 20.0, 45.0));
    }

    #[test]
    fn test_reading_is_empty() {
        let now = Utc::now();
        let empty = AirQualityReading::from_pollutants(0.0, 0.0, 0.0, 0.0, 0.0, now, "nowhere");
        assert!(empty.is_empty());
        let partial = AirQualityReading::from_pollutants(0.0, 0.0, 0.0, 12.0, 0.0, now, "site");
        assert!(!partial.is_empty());
    }

    #[test]
    fn test_tone_serialization() {
        assert_eq!(serde_json::to_string(&Tone::Warning).unwrap(), "\"warning\"");
        let tone: Tone = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(tone, Tone::Urgent);
    }
}
