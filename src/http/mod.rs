//! Axum-based HTTP server exposing the aggregation pipeline.
//!
//! Thin delegation layer: handlers validate coordinates, call the service
//! layer, and serialize its DTOs. No business logic lives here.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
