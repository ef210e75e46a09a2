//! Error types for provider operations.
//!
//! Provider failures are degradable by design: the aggregator and the
//! advisory responder catch [`ProviderError`] and substitute a fallback, so
//! these errors never cross the public service API. They exist so the
//! provider clients and their tests can distinguish failure modes.

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Error type for provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },

    /// The request never completed (DNS, TLS, timeout, connection reset).
    #[error("transport failure talking to {provider}: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but could not be interpreted.
    #[error("malformed response from {provider}: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },
}

impl ProviderError {
    /// Name of the provider that failed, for logging.
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Status { provider, .. } => provider,
            ProviderError::Transport { provider, .. } => provider,
            ProviderError::Malformed { provider, .. } => provider,
        }
    }
}
