//! # AeroSense Backend
//!
//! Air-quality aggregation and advisory engine.
//!
//! This crate provides the Rust backend for the AeroSense air-quality
//! dashboard. It pulls pollutant readings and forecasts from several external
//! providers (ground-sensor network, satellite/reanalysis services, a weather
//! service pollution feed), normalizes them into a single canonical form,
//! derives an air-quality index, and answers free-text questions about the
//! current conditions. The results are exposed to the React frontend through
//! a REST API via Axum.
//!
//! ## Features
//!
//! - **Aggregation**: Fetch and merge readings from independent providers,
//!   degrading per provider instead of failing the whole request
//! - **Normalization**: Source-priority selection of the best measurement for
//!   each tracked pollutant
//! - **AQI Computation**: Ceiling-scaled sub-indices combined by the
//!   worst-pollutant rule
//! - **Forecasting**: Six-step hourly forecasts from the provider feed, with
//!   a deterministic synthetic fallback
//! - **Advisory**: Generative-backend answers with a rule-table fallback that
//!   always produces a response
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) shared with the frontend
//! - [`models`]: AQI computation and pollutant/source domain types
//! - [`providers`]: External provider traits, wire schemas, and HTTP clients
//! - [`services`]: Aggregation, normalization, forecasting, and advisory logic
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Degradation model
//!
//! Every provider call is independently fallible. A failed or malformed
//! provider response is logged and replaced by a deterministic synthetic
//! fallback, so callers of the public service API never observe a provider
//! error. See [`services::aggregator`] and [`services::advisory`].

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod noise;
pub mod providers;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
