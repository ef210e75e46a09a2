//! Pollutant and measurement-source vocabulary.
//!
//! Provider responses arrive keyed by loosely-typed parameter strings; this
//! module gives them a strict vocabulary and carries the source-priority
//! configuration the normalizer selects with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pollutant species reported by at least one upstream provider.
///
/// Only PM2.5, NO₂, and O₃ feed the AQI; the rest are parsed so provider
/// payloads round-trip without loss.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    No2,
    O3,
    Co,
    No,
    So2,
    Pm10,
    Nh3,
}

impl Pollutant {
    /// Parse a provider parameter string, tolerating the spellings seen in
    /// the wild (`pm25`, `pm2_5`, `pm2.5`, case differences).
    pub fn parse(parameter: &str) -> Option<Self> {
        match parameter.to_ascii_lowercase().as_str() {
            "pm25" | "pm2_5" | "pm2.5" => Some(Pollutant::Pm25),
            "no2" => Some(Pollutant::No2),
            "o3" => Some(Pollutant::O3),
            "co" => Some(Pollutant::Co),
            "no" => Some(Pollutant::No),
            "so2" => Some(Pollutant::So2),
            "pm10" => Some(Pollutant::Pm10),
            "nh3" => Some(Pollutant::Nh3),
            _ => None,
        }
    }
}

/// Measurement modality a reading came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    GroundSensor,
    Satellite,
    Reanalysis,
}

/// One raw measurement from one external source.
///
/// Created per provider response, consumed immediately by the normalizer,
/// and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderReading {
    pub parameter: Pollutant,
    pub value: f64,
    pub unit: String,
    pub observed_at: DateTime<Utc>,
    pub source: SourceId,
}

/// Per-pollutant source preference order.
///
/// Each pollutant has a "best" measurement modality: satellites retrieve NO₂
/// and O₃ columns well but do not directly measure PM2.5, so ground sensors
/// lead for particulates. The order is configuration rather than being baked
/// into the normalizer, so it can be re-tuned without code changes.
#[derive(Debug, Clone)]
pub struct SourcePriority {
    order: HashMap<Pollutant, Vec<SourceId>>,
    default_order: Vec<SourceId>,
}

impl SourcePriority {
    /// Build a priority table from explicit per-pollutant orders.
    ///
    /// Pollutants without an entry use `default_order`.
    pub fn new(order: HashMap<Pollutant, Vec<SourceId>>, default_order: Vec<SourceId>) -> Self {
        Self {
            order,
            default_order,
        }
    }

    /// Preference order for one pollutant, highest priority first.
    pub fn for_pollutant(&self, pollutant: Pollutant) -> &[SourceId] {
        self.order
            .get(&pollutant)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_order)
    }
}

impl Default for SourcePriority {
    fn default() -> Self {
        let mut order = HashMap::new();
        order.insert(
            Pollutant::Pm25,
            vec![
                SourceId::GroundSensor,
                SourceId::Satellite,
                SourceId::Reanalysis,
            ],
        );
        order.insert(
            Pollutant::No2,
            vec![
                SourceId::Satellite,
                SourceId::GroundSensor,
                SourceId::Reanalysis,
            ],
        );
        order.insert(
            Pollutant::O3,
            vec![
                SourceId::Satellite,
                SourceId::GroundSensor,
                SourceId::Reanalysis,
            ],
        );
        Self::new(
            order,
            vec![
                SourceId::GroundSensor,
                SourceId::Satellite,
                SourceId::Reanalysis,
            ],
        )
    }
}
