//! Short-horizon forecast generation.
//!
//! Two paths produce the six-step hourly forecast. The preferred path maps
//! the provider's forecast feed directly, with a fixed linear confidence
//! decay (the feed supplies no uncertainty of its own). The fallback path
//! synthesizes a sinusoidal variation around a base reading with
//! per-pollutant amplitude scaling and physical floors.
//!
//! Either way the horizon is exactly [`HORIZON_STEPS`] points with strictly
//! increasing timestamps, and each point's AQI is recomputed from its own
//! pollutant values.

use chrono::{DateTime, Duration, Utc};

use crate::api::{AirQualityReading, ForecastPoint};
use crate::providers::PollutionSample;

/// Number of forecast steps.
pub const HORIZON_STEPS: usize = 6;
/// Spacing between steps, hours.
pub const STEP_INTERVAL_HOURS: i64 = 1;

/// Confidence of the first feed-backed step; each later step loses
/// [`CONFIDENCE_DECAY`].
const FEED_CONFIDENCE_BASE: f64 = 0.9;
/// Confidence of the first synthesized step.
const SYNTHETIC_CONFIDENCE_BASE: f64 = 0.85;
const CONFIDENCE_DECAY: f64 = 0.08;

/// Sinusoidal variation amplitude for PM2.5, µg/m³.
const VARIATION_AMPLITUDE: f64 = 15.0;
/// Fraction of the variation applied to NO₂.
const NO2_AMPLITUDE_FACTOR: f64 = 0.3;
/// Fraction of the variation applied to O₃.
const O3_AMPLITUDE_FACTOR: f64 = 0.5;

/// Physical floors keeping synthesized values plausible, µg/m³.
const PM25_FLOOR: f64 = 10.0;
const NO2_FLOOR: f64 = 5.0;
const O3_FLOOR: f64 = 20.0;

/// Map the provider forecast feed onto the fixed horizon.
///
/// Returns `None` when the feed cannot fill the whole horizon, in which case
/// the caller synthesizes instead; a partial feed must not shorten the
/// forecast.
pub fn from_feed(samples: &[PollutionSample]) -> Option<Vec<ForecastPoint>> {
    if samples.len() < HORIZON_STEPS {
        return None;
    }

    let points = samples
        .iter()
        .take(HORIZON_STEPS)
        .enumerate()
        .map(|(step, sample)| {
            ForecastPoint::from_pollutants(
                sample.timestamp,
                sample.pm2_5,
                sample.no2,
                sample.o3,
                FEED_CONFIDENCE_BASE - step as f64 * CONFIDENCE_DECAY,
            )
        })
        .collect();
    Some(points)
}

/// Synthesize the forecast from a base reading.
///
/// Each step `i` applies `sin(i * 0.5) * amplitude` around the base value,
/// scaled per pollutant and floored to keep the result physical.
pub fn synthesize(base: &AirQualityReading, start: DateTime<Utc>) -> Vec<ForecastPoint> {
    (0..HORIZON_STEPS)
        .map(|step| {
            let variation = (step as f64 * 0.5).sin() * VARIATION_AMPLITUDE;
            let pm25 = (base.pm25 + variation).max(PM25_FLOOR);
            let no2 = (base.no2 + variation * NO2_AMPLITUDE_FACTOR).max(NO2_FLOOR);
            let o3 = (base.o3 + variation * O3_AMPLITUDE_FACTOR).max(O3_FLOOR);

            ForecastPoint::from_pollutants(
                start + Duration::hours(step as i64 * STEP_INTERVAL_HOURS),
                pm25,
                no2,
                o3,
                SYNTHETIC_CONFIDENCE_BASE - step as f64 * CONFIDENCE_DECAY,
            )
        })
        .collect()
}
