//! Integration tests for the advisory responder with scripted backends.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use aerosense_backend::api::{AirQualityReading, Tone};
use aerosense_backend::error::{ProviderError, ProviderResult};
use aerosense_backend::providers::GenerativeBackend;
use aerosense_backend::services::AdvisoryResponder;

/// Backend that replies with fixed text and records the prompt it saw.
struct RecordingBackend {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingBackend {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn empty() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeBackend for RecordingBackend {
    async fn generate(&self, prompt: &str) -> ProviderResult<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Backend that always fails.
struct DownBackend;

#[async_trait]
impl GenerativeBackend for DownBackend {
    async fn generate(&self, _prompt: &str) -> ProviderResult<Option<String>> {
        Err(ProviderError::Status {
            provider: "gemini",
            status: 500,
        })
    }
}

fn reading(pm25: f64, no2: f64, o3: f64) -> AirQualityReading {
    AirQualityReading::from_pollutants(
        9.9312,
        76.2673,
        pm25,
        no2,
        o3,
        Utc::now(),
        "Kochi City Center",
    )
}

#[tokio::test]
async fn test_primary_path_uses_backend_text() {
    let backend = Arc::new(RecordingBackend::replying(
        "Keep windows closed until the evening.",
    ));
    let responder = AdvisoryResponder::new(backend.clone());

    let result = responder
        .respond("Should I air out the house?", &reading(82.0, 20.0, 45.0), None)
        .await;

    assert_eq!(result.reply_text, "Keep windows closed until the evening.");
    // aqi 273 > 150 → urgent regardless of the generated text.
    assert_eq!(result.tone, Tone::Urgent);
    assert!((result.confidence - 0.85).abs() < 1e-9);
    assert_eq!(
        result.sources,
        vec!["OpenAQ", "OpenWeatherMap", "WHO Guidelines"]
    );

    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Kochi City Center"));
    assert!(prompts[0].contains("\"Should I air out the house?\""));
}

#[tokio::test]
async fn test_backend_failure_never_reaches_caller() {
    let responder = AdvisoryResponder::new(Arc::new(DownBackend));

    let result = responder
        .respond("How is the air quality today?", &reading(82.0, 20.0, 45.0), None)
        .await;

    // aqi 273 > 100 → the status template warns.
    assert_eq!(result.tone, Tone::Warning);
    assert!(result.reply_text.contains("Kochi City Center"));
}

#[tokio::test]
async fn test_empty_backend_reply_falls_back() {
    let responder = AdvisoryResponder::new(Arc::new(RecordingBackend::empty()));

    let result = responder
        .respond("Can the kids play outdoor today?", &reading(82.0, 20.0, 45.0), None)
        .await;

    assert_eq!(result.tone, Tone::Warning);
    assert!(result.reply_text.contains("WHO guideline"));
}

#[tokio::test]
async fn test_outdoor_query_clean_air_is_positive() {
    let responder = AdvisoryResponder::new(Arc::new(DownBackend));

    let result = responder
        .respond("Can the kids play outdoor today?", &reading(10.0, 8.0, 20.0), None)
        .await;

    assert_eq!(result.tone, Tone::Positive);
    assert!(result.reply_text.contains("10.0"));
}

#[tokio::test]
async fn test_moderate_pm25_tone_on_primary_path() {
    let responder = AdvisoryResponder::new(Arc::new(RecordingBackend::replying("Take it easy.")));

    // pm25 40 → warning band (aqi 133 > 100 as well)
    let result = responder
        .respond("any advice?", &reading(40.0, 10.0, 30.0), None)
        .await;
    assert_eq!(result.tone, Tone::Warning);
}

#[tokio::test]
async fn test_implausible_reading_penalizes_confidence() {
    let responder = AdvisoryResponder::new(Arc::new(RecordingBackend::replying("Stay inside.")));

    let result = responder
        .respond("status?", &reading(700.0, 10.0, 30.0), None)
        .await;
    // Both pm25 and the derived aqi are out of range: two penalties, floored.
    assert!((result.confidence - 0.5).abs() < 1e-9);
}
