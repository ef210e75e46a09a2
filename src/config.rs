//! Provider configuration and environment variable handling.

use std::env;

/// Default OpenAQ API base URL.
pub const DEFAULT_OPENAQ_BASE: &str = "https://api.openaq.org/v2";
/// Default OpenWeatherMap API base URL.
pub const DEFAULT_OPENWEATHER_BASE: &str = "https://api.openweathermap.org/data/2.5";
/// Default NASA API base URL used for the satellite availability probe.
pub const DEFAULT_NASA_BASE: &str = "https://api.nasa.gov";
/// Default Gemini generateContent endpoint base.
pub const DEFAULT_GEMINI_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash";

/// Provider configuration loaded from environment variables.
///
/// Missing API keys do not prevent startup: the affected providers simply
/// fail their calls and the services degrade to their fallbacks.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// OpenAQ base URL (no key required)
    pub openaq_base_url: String,
    /// OpenWeatherMap base URL
    pub openweather_base_url: String,
    /// OpenWeatherMap API key
    pub openweather_api_key: Option<String>,
    /// NASA API base URL
    pub nasa_base_url: String,
    /// NASA API key
    pub nasa_api_key: Option<String>,
    /// Gemini endpoint base URL
    pub gemini_base_url: String,
    /// Gemini API key
    pub gemini_api_key: Option<String>,
}

impl ProviderConfig {
    /// Create a provider configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `OPENAQ_BASE_URL` (optional): override the OpenAQ endpoint
    /// - `OPENWEATHER_BASE_URL` (optional): override the OpenWeatherMap endpoint
    /// - `OPENWEATHER_API_KEY` (optional): OpenWeatherMap key; pollution feed
    ///   and weather lookups degrade without it
    /// - `NASA_BASE_URL` (optional): override the NASA endpoint
    /// - `NASA_API_KEY` (optional): NASA key; satellite lookups degrade
    ///   without it
    /// - `GEMINI_BASE_URL` (optional): override the Gemini endpoint
    /// - `GEMINI_API_KEY` (optional): Gemini key; the advisory responder uses
    ///   its local fallback without it
    pub fn from_env() -> Self {
        Self {
            openaq_base_url: env::var("OPENAQ_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAQ_BASE.to_string()),
            openweather_base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENWEATHER_BASE.to_string()),
            openweather_api_key: env::var("OPENWEATHER_API_KEY").ok(),
            nasa_base_url: env::var("NASA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NASA_BASE.to_string()),
            nasa_api_key: env::var("NASA_API_KEY").ok(),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE.to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openaq_base_url: DEFAULT_OPENAQ_BASE.to_string(),
            openweather_base_url: DEFAULT_OPENWEATHER_BASE.to_string(),
            openweather_api_key: None,
            nasa_base_url: DEFAULT_NASA_BASE.to_string(),
            nasa_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE.to_string(),
            gemini_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_public_endpoints() {
        let config = ProviderConfig::default();
        assert!(config.openaq_base_url.starts_with("https://"));
        assert!(config.openweather_api_key.is_none());
    }
}
