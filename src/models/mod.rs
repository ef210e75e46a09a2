//! Domain model types and pure computations.
//!
//! This module holds the pieces of the pipeline with no I/O: the AQI
//! computation and the pollutant/source vocabulary used by the normalizer.

pub mod aqi;
pub mod pollutant;

pub use pollutant::{Pollutant, ProviderReading, SourceId, SourcePriority};
