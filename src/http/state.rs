//! Application state for the HTTP server.

use std::sync::Arc;

use crate::providers::PollutionFeedProvider;
use crate::services::{AdvisoryResponder, SourceAggregator};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Multi-provider aggregation service
    pub aggregator: Arc<SourceAggregator>,
    /// Advisory responder with its generative backend
    pub responder: Arc<AdvisoryResponder>,
    /// Weather lookup used as advisory context
    pub weather: Arc<dyn PollutionFeedProvider>,
}

impl AppState {
    /// Create a new application state with the given services.
    pub fn new(
        aggregator: Arc<SourceAggregator>,
        responder: Arc<AdvisoryResponder>,
        weather: Arc<dyn PollutionFeedProvider>,
    ) -> Self {
        Self {
            aggregator,
            responder,
            weather,
        }
    }
}
