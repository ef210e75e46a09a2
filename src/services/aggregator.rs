//! Multi-provider source aggregation.
//!
//! Orchestrates the ground-sensor network, the satellite/reanalysis lookup,
//! and the weather-service pollution feed into the canonical readings and
//! forecasts the frontend consumes. Every provider is independently
//! fallible; a failure degrades that provider's contribution and is logged,
//! never surfaced to the caller. The public methods are infallible and the
//! current-readings path always returns a non-empty result.

use std::f64::consts::PI;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::api::{AirQualityReading, DataSourceDescriptor, ForecastPoint};
use crate::models::SourcePriority;
use crate::providers::{
    GroundSensorProvider, PollutionFeedProvider, SatelliteProvider, SatelliteSample, SensorSite,
};
use crate::services::{fallback, forecast, normalizer};

/// Nearest reporting sites kept from the provider's candidate set.
const MAX_SITES: usize = 10;

/// Points sampled by the regional satellite sweep.
const SWEEP_POINTS: usize = 5;

/// Kilometers per degree of latitude, for sweep radius conversion.
const KM_PER_DEGREE: f64 = 111.0;

/// Aggregates independent providers into canonical readings and forecasts.
pub struct SourceAggregator {
    ground: Arc<dyn GroundSensorProvider>,
    satellite: Arc<dyn SatelliteProvider>,
    pollution: Arc<dyn PollutionFeedProvider>,
    priority: SourcePriority,
}

impl SourceAggregator {
    pub fn new(
        ground: Arc<dyn GroundSensorProvider>,
        satellite: Arc<dyn SatelliteProvider>,
        pollution: Arc<dyn PollutionFeedProvider>,
    ) -> Self {
        Self {
            ground,
            satellite,
            pollution,
            priority: SourcePriority::default(),
        }
    }

    /// Replace the default source-priority configuration.
    pub fn with_priority(mut self, priority: SourcePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Fetch current readings for the sites nearest a coordinate.
    ///
    /// Ground sites are enriched with satellite columns concurrently; one
    /// site's enrichment failure degrades that site to ground-only values.
    /// Sites left with no usable data are filtered out, and a total provider
    /// failure degrades to the deterministic synthetic neighborhood, so the
    /// result is never empty.
    pub async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Vec<AirQualityReading> {
        let sites = match self.ground.nearby_sites(lat, lon, radius_km).await {
            Ok(sites) if !sites.is_empty() => sites,
            Ok(_) => {
                warn!("ground network returned no sites, using synthetic fallback");
                fallback::synthetic_sites(lat, lon)
            }
            Err(err) => {
                warn!(provider = err.provider(), error = %err, "ground network unavailable, using synthetic fallback");
                fallback::synthetic_sites(lat, lon)
            }
        };

        let sites: Vec<SensorSite> = sites.into_iter().take(MAX_SITES).collect();
        debug!(sites = sites.len(), "enriching ground sites");

        let readings = join_all(sites.iter().map(|site| self.enrich_site(site))).await;
        let readings: Vec<AirQualityReading> =
            readings.into_iter().filter(|r| !r.is_empty()).collect();

        if !readings.is_empty() {
            return readings;
        }

        // Every site filtered out: synthesize so the caller still gets data.
        warn!("no usable data after normalization, synthesizing readings");
        join_all(
            fallback::synthetic_sites(lat, lon)
                .iter()
                .map(|site| self.enrich_site(site)),
        )
        .await
    }

    /// Normalize one site, enriched with a satellite column when available.
    async fn enrich_site(&self, site: &SensorSite) -> AirQualityReading {
        let mut readings = site.provider_readings();

        match self
            .satellite
            .column_lookup(site.coordinates.latitude, site.coordinates.longitude)
            .await
        {
            Ok(Some(sample)) => readings.extend(sample.provider_readings()),
            Ok(None) => debug!(site = %site.name, "no satellite column for site"),
            Err(err) => {
                warn!(provider = err.provider(), site = %site.name, error = %err, "enrichment failed, keeping ground-only values");
            }
        }

        normalizer::normalize(
            &readings,
            &self.priority,
            site.coordinates.latitude,
            site.coordinates.longitude,
            &site.name,
            Utc::now(),
        )
    }

    /// Fetch the six-step hourly forecast for a coordinate.
    ///
    /// Prefers the provider feed; a failed, empty, or short feed falls back
    /// to the synthetic forecast seeded from the current reading, or from
    /// the default baseline when even that is unavailable.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Vec<ForecastPoint> {
        match self.pollution.pollution_forecast(lat, lon).await {
            Ok(samples) => {
                if let Some(points) = forecast::from_feed(&samples) {
                    return points;
                }
                warn!(
                    steps = samples.len(),
                    "forecast feed cannot fill the horizon, synthesizing"
                );
            }
            Err(err) => {
                warn!(provider = err.provider(), error = %err, "forecast feed unavailable, synthesizing");
            }
        }

        let base = match self.pollution.current_pollution(lat, lon).await {
            Ok(Some(sample)) => AirQualityReading::from_pollutants(
                lat,
                lon,
                sample.pm2_5,
                sample.no2,
                sample.o3,
                sample.timestamp,
                fallback::DEFAULT_BASELINE_LABEL,
            ),
            Ok(None) => baseline_reading(lat, lon),
            Err(err) => {
                warn!(provider = err.provider(), error = %err, "current pollution unavailable, seeding forecast from baseline");
                baseline_reading(lat, lon)
            }
        };

        forecast::synthesize(&base, Utc::now())
    }

    /// Sample satellite columns on a circle around a center coordinate.
    ///
    /// Lookups run concurrently; failed points are dropped rather than
    /// failing the sweep.
    pub async fn satellite_sweep(
        &self,
        center_lat: f64,
        center_lon: f64,
        radius_km: f64,
    ) -> Vec<SatelliteSample> {
        let distance_deg = radius_km / KM_PER_DEGREE;

        let lookups = (0..SWEEP_POINTS).map(|i| {
            let angle = (i as f64 / SWEEP_POINTS as f64) * 2.0 * PI;
            let lat = center_lat + distance_deg * angle.cos();
            let lon = center_lon + distance_deg * angle.sin() / center_lat.to_radians().cos();
            async move {
                match self.satellite.column_lookup(lat, lon).await {
                    Ok(sample) => sample,
                    Err(err) => {
                        warn!(provider = err.provider(), error = %err, "sweep point failed");
                        None
                    }
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Static metadata for the upstream data sources.
    pub fn data_sources(&self) -> Vec<DataSourceDescriptor> {
        let now = Utc::now();
        vec![
            DataSourceDescriptor {
                name: "TEMPO NRT".to_string(),
                timestamp: now,
                confidence: 0.92,
                description: "NASA satellite tropospheric observations".to_string(),
            },
            DataSourceDescriptor {
                name: "OpenAQ".to_string(),
                timestamp: now,
                confidence: 0.88,
                description: "Ground-level sensor network".to_string(),
            },
            DataSourceDescriptor {
                name: "MERRA-2".to_string(),
                timestamp: now,
                confidence: 0.85,
                description: "Atmospheric reanalysis model".to_string(),
            },
        ]
    }
}

/// Reading used to seed a forecast when no current data exists at all.
fn baseline_reading(lat: f64, lon: f64) -> AirQualityReading {
    let (pm25, no2, o3) = fallback::DEFAULT_BASELINE;
    AirQualityReading::from_pollutants(
        lat,
        lon,
        pm25,
        no2,
        o3,
        Utc::now(),
        fallback::DEFAULT_BASELINE_LABEL,
    )
}
