//! Pollutant normalization.
//!
//! Collapses a batch of raw provider measurements into one canonical reading
//! per location. For each tracked pollutant the highest-priority source that
//! reports it wins; a pollutant nobody reports defaults to 0, which lets the
//! aggregator recognize and filter sites with no usable data.

use chrono::{DateTime, Utc};

use crate::api::AirQualityReading;
use crate::models::{Pollutant, ProviderReading, SourcePriority};

/// Select the value for one pollutant according to the priority order.
fn select_value(
    readings: &[ProviderReading],
    pollutant: Pollutant,
    priority: &SourcePriority,
) -> f64 {
    for source in priority.for_pollutant(pollutant) {
        if let Some(reading) = readings
            .iter()
            .find(|r| r.parameter == pollutant && r.source == *source)
        {
            return reading.value;
        }
    }
    0.0
}

/// Normalize a batch of provider readings into a canonical reading.
///
/// # Arguments
/// * `readings` - Raw measurements from any mix of sources
/// * `priority` - Per-pollutant source preference order
/// * `lat`, `lon`, `location` - Identity of the site the readings describe
/// * `timestamp` - Observation instant stamped onto the canonical reading
///
/// # Returns
/// A canonical reading with the derived AQI. Never fails: missing pollutants
/// become 0.
pub fn normalize(
    readings: &[ProviderReading],
    priority: &SourcePriority,
    lat: f64,
    lon: f64,
    location: &str,
    timestamp: DateTime<Utc>,
) -> AirQualityReading {
    let pm25 = select_value(readings, Pollutant::Pm25, priority);
    let no2 = select_value(readings, Pollutant::No2, priority);
    let o3 = select_value(readings, Pollutant::O3, priority);

    AirQualityReading::from_pollutants(lat, lon, pm25, no2, o3, timestamp, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceId;

    fn reading(parameter: Pollutant, value: f64, source: SourceId) -> ProviderReading {
        ProviderReading {
            parameter,
            value,
            unit: "µg/m³".to_string(),
            observed_at: Utc::now(),
            source,
        }
    }

    #[test]
    fn test_satellite_wins_no2_when_both_report() {
        let readings = vec![
            reading(Pollutant::No2, 30.0, SourceId::GroundSensor),
            reading(Pollutant::No2, 24.0, SourceId::Satellite),
        ];
        let result = normalize(
            &readings,
            &SourcePriority::default(),
            9.93,
            76.27,
            "Kochi City Center",
            Utc::now(),
        );
        assert_eq!(result.no2, 24.0);
    }

    #[test]
    fn test_ground_used_when_satellite_absent() {
        let readings = vec![reading(Pollutant::No2, 30.0, SourceId::GroundSensor)];
        let result = normalize(
            &readings,
            &SourcePriority::default(),
            9.93,
            76.27,
            "Fort Kochi",
            Utc::now(),
        );
        assert_eq!(result.no2, 30.0);
    }

    #[test]
    fn test_ground_wins_pm25_over_satellite() {
        // Satellites do not directly retrieve PM2.5; a reanalysis estimate
        // must lose to the ground sensor.
        let readings = vec![
            reading(Pollutant::Pm25, 12.0, SourceId::Reanalysis),
            reading(Pollutant::Pm25, 58.0, SourceId::GroundSensor),
        ];
        let result = normalize(
            &readings,
            &SourcePriority::default(),
            9.97,
            76.24,
            "Fort Kochi",
            Utc::now(),
        );
        assert_eq!(result.pm25, 58.0);
    }

    #[test]
    fn test_missing_pollutant_defaults_to_zero() {
        let readings = vec![reading(Pollutant::Pm25, 45.0, SourceId::GroundSensor)];
        let result = normalize(
            &readings,
            &SourcePriority::default(),
            9.93,
            76.27,
            "Central Station",
            Utc::now(),
        );
        assert_eq!(result.no2, 0.0);
        assert_eq!(result.o3, 0.0);
        assert_eq!(result.pm25, 45.0);
    }

    #[test]
    fn test_empty_batch_normalizes_to_empty_reading() {
        let result = normalize(
            &[],
            &SourcePriority::default(),
            9.93,
            76.27,
            "nowhere",
            Utc::now(),
        );
        assert!(result.is_empty());
        assert_eq!(result.aqi, 0);
    }

    #[test]
    fn test_aqi_derived_from_selected_values() {
        let readings = vec![
            reading(Pollutant::Pm25, 82.0, SourceId::GroundSensor),
            reading(Pollutant::No2, 20.0, SourceId::Satellite),
            reading(Pollutant::O3, 45.0, SourceId::Satellite),
        ];
        let result = normalize(
            &readings,
            &SourcePriority::default(),
            9.93,
            76.27,
            "Kochi City Center",
            Utc::now(),
        );
        assert_eq!(result.aqi, 273);
    }
}
