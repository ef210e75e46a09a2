//! Air-quality index computation.
//!
//! Each tracked pollutant is scaled against a regulatory reference ceiling
//! onto a 0–50 sub-index; the overall AQI is the maximum of the sub-indices,
//! following the convention that the worst pollutant drives health risk.
//! This is a deliberate simplification of piecewise-breakpoint AQI standards
//! and is kept as-is for parity with the dashboard frontend.

use serde::Serialize;

/// WHO 24-hour guideline for PM2.5, µg/m³.
pub const PM25_CEILING: f64 = 15.0;
/// Reference ceiling for NO₂, µg/m³.
pub const NO2_CEILING: f64 = 40.0;
/// Reference ceiling for O₃, µg/m³.
pub const O3_CEILING: f64 = 100.0;

/// Compute the overall AQI for a set of pollutant concentrations.
///
/// Pure and total: negative inputs are not rejected, they simply propagate a
/// negative sub-index. Callers are responsible for clamping upstream.
///
/// # Arguments
/// * `pm25` - PM2.5 concentration in µg/m³
/// * `no2` - NO₂ concentration in µg/m³
/// * `o3` - O₃ concentration in µg/m³
///
/// # Returns
/// The worst sub-index, rounded to the nearest integer.
pub fn compute_aqi(pm25: f64, no2: f64, o3: f64) -> i32 {
    let pm25_sub = (pm25 / PM25_CEILING) * 50.0;
    let no2_sub = (no2 / NO2_CEILING) * 50.0;
    let o3_sub = (o3 / O3_CEILING) * 50.0;
    pm25_sub.max(no2_sub).max(o3_sub).round() as i32
}

/// Display band for an AQI value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AqiBand {
    pub level: &'static str,
    /// Hex display color used by the map and chart
    pub color: &'static str,
    pub advice: &'static str,
}

/// Classify an AQI value into its display band.
pub fn aqi_band(aqi: i32) -> AqiBand {
    if aqi <= 50 {
        AqiBand {
            level: "Good",
            color: "#10b981",
            advice: "Air quality is satisfactory",
        }
    } else if aqi <= 100 {
        AqiBand {
            level: "Moderate",
            color: "#f59e0b",
            advice: "Sensitive groups should limit outdoor activity",
        }
    } else if aqi <= 150 {
        AqiBand {
            level: "Unhealthy for Sensitive Groups",
            color: "#f97316",
            advice: "Reduce prolonged outdoor exertion",
        }
    } else if aqi <= 200 {
        AqiBand {
            level: "Unhealthy",
            color: "#ef4444",
            advice: "Everyone should reduce outdoor activity",
        }
    } else {
        AqiBand {
            level: "Very Unhealthy",
            color: "#991b1b",
            advice: "Avoid all outdoor activity",
        }
    }
}
