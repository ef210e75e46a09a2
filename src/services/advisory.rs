//! Advisory responder.
//!
//! Answers free-text questions about the current reading. The primary path
//! sends a constructed prompt to the generative backend and classifies the
//! reply's tone from the reading's severity. When the backend is
//! unavailable or returns nothing usable, an ordered rule table over
//! (query keyword bucket × severity bucket) selects a canned template, so a
//! chat query never surfaces an error.

use std::sync::Arc;

use tracing::warn;

use crate::api::{AdvisoryResult, AirQualityReading, Tone};
use crate::models::aqi::PM25_CEILING;
use crate::providers::{GenerativeBackend, WeatherSnapshot};

/// Data sources cited with every advisory reply.
const SOURCES: [&str; 3] = ["OpenAQ", "OpenWeatherMap", "WHO Guidelines"];

/// Baseline responder confidence before plausibility penalties.
const BASE_CONFIDENCE: f64 = 0.85;
/// Penalty applied per implausible field.
const PLAUSIBILITY_PENALTY: f64 = 0.2;
/// Upper bound of the physically plausible range for pm25 and AQI.
const PLAUSIBLE_MAX: f64 = 500.0;

/// Answers queries against a generative backend with a local fallback.
pub struct AdvisoryResponder {
    backend: Arc<dyn GenerativeBackend>,
}

impl AdvisoryResponder {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Answer a query about a reading.
    ///
    /// Infallible by construction: backend failures degrade to the rule
    /// table.
    pub async fn respond(
        &self,
        query: &str,
        reading: &AirQualityReading,
        weather: Option<&WeatherSnapshot>,
    ) -> AdvisoryResult {
        let prompt = build_prompt(query, reading, weather);

        match self.backend.generate(&prompt).await {
            Ok(Some(text)) => AdvisoryResult {
                reply_text: text,
                tone: determine_tone(reading),
                confidence: reading_confidence(reading),
                sources: SOURCES.iter().map(|s| s.to_string()).collect(),
                highlight_area: None,
            },
            Ok(None) => {
                warn!("generative backend returned no text, using fallback");
                fallback_response(query, reading)
            }
            Err(err) => {
                warn!(provider = err.provider(), error = %err, "generative backend failed, using fallback");
                fallback_response(query, reading)
            }
        }
    }
}

/// Build the generative prompt embedding the reading and query.
pub fn build_prompt(
    query: &str,
    reading: &AirQualityReading,
    weather: Option<&WeatherSnapshot>,
) -> String {
    let weather_info = weather
        .map(|w| {
            format!(
                "\nWeather Conditions:\nTemperature: {}°C, Humidity: {}%, Wind Speed: {} m/s\n",
                w.temperature_c, w.humidity_pct, w.wind_speed_ms
            )
        })
        .unwrap_or_default();

    format!(
        "You are AeroSense, a friendly and knowledgeable air quality guardian assistant. \
Provide helpful, accurate information about air quality and health recommendations.\n\n\
Current Air Quality Data for {location}:\n\
- PM2.5: {pm25:.1} µg/m³ (WHO safe limit: {who_limit} µg/m³)\n\
- NO₂: {no2:.1} µg/m³\n\
- O₃: {o3:.1} µg/m³\n\
- AQI: {aqi}\n\
{weather_info}\n\
User Question: \"{query}\"\n\n\
Provide a concise, actionable response (2-3 sentences max) that:\n\
1. Directly answers the user's question\n\
2. Gives clear health recommendations if relevant\n\
3. Mentions specific pollutant levels when important\n\
4. Uses a conversational, caring tone\n\n\
Response:",
        location = reading.location,
        pm25 = reading.pm25,
        who_limit = PM25_CEILING,
        no2 = reading.no2,
        o3 = reading.o3,
        aqi = reading.aqi,
        weather_info = weather_info,
        query = query,
    )
}

/// Classify the reply tone from the reading's severity.
pub fn determine_tone(reading: &AirQualityReading) -> Tone {
    if reading.aqi > 150 || reading.pm25 > 55.0 {
        Tone::Urgent
    } else if reading.aqi > 100 || reading.pm25 > 35.0 {
        Tone::Warning
    } else if reading.pm25 < 15.0 && reading.aqi < 50 {
        Tone::Positive
    } else {
        Tone::Calm
    }
}

/// Responder confidence, penalized when the reading is physically implausible.
pub fn reading_confidence(reading: &AirQualityReading) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if reading.pm25 < 0.0 || reading.pm25 > PLAUSIBLE_MAX {
        confidence -= PLAUSIBILITY_PENALTY;
    }
    if reading.aqi < 0 || reading.aqi as f64 > PLAUSIBLE_MAX {
        confidence -= PLAUSIBILITY_PENALTY;
    }

    confidence.clamp(0.5, 1.0)
}

// ---------------------------------------------------------------------------
// Fallback rule table
// ---------------------------------------------------------------------------

/// Keyword bucket a query falls into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum QueryBucket {
    /// "Can the kids play outside?"
    Activity,
    /// "How is the air quality today?"
    Status,
    /// "When will conditions improve?"
    Improvement,
    /// "Why is the air bad?"
    Causal,
}

/// Keyword buckets in match order; the first bucket with a hit wins.
const BUCKETS: [(QueryBucket, &[&str]); 4] = [
    (QueryBucket::Activity, &["play", "outdoor", "exercise"]),
    (QueryBucket::Status, &["air quality", "how", "today"]),
    (QueryBucket::Improvement, &["when", "improve"]),
    (QueryBucket::Causal, &["why", "cause"]),
];

fn classify_query(query: &str) -> Option<QueryBucket> {
    let lower = query.to_lowercase();
    BUCKETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(bucket, _)| *bucket)
}

/// Severity signals the rule table matches against.
struct Severity {
    /// PM2.5 above the WHO guideline
    pm25_elevated: bool,
    /// AQI above 100
    aqi_high: bool,
}

impl Severity {
    fn of(reading: &AirQualityReading) -> Self {
        Self {
            pm25_elevated: reading.pm25 > PM25_CEILING,
            aqi_high: reading.aqi > 100,
        }
    }
}

/// Severity condition attached to a rule.
#[derive(Debug, Copy, Clone)]
enum SeverityMatch {
    /// Either signal raised
    AnyHigh,
    /// AQI over 100
    AqiHigh,
    /// PM2.5 over the guideline (regardless of AQI)
    Pm25Elevated,
    /// Unconditional
    Any,
}

impl SeverityMatch {
    fn matches(self, severity: &Severity) -> bool {
        match self {
            SeverityMatch::AnyHigh => severity.pm25_elevated || severity.aqi_high,
            SeverityMatch::AqiHigh => severity.aqi_high,
            SeverityMatch::Pm25Elevated => severity.pm25_elevated,
            SeverityMatch::Any => true,
        }
    }
}

type Template = fn(&AirQualityReading) -> String;

/// One (bucket, severity) → (template, tone) rule.
struct FallbackRule {
    bucket: QueryBucket,
    severity: SeverityMatch,
    tone: Tone,
    template: Template,
}

/// The fallback classifier, evaluated top to bottom; first match wins.
const RULES: [FallbackRule; 9] = [
    FallbackRule {
        bucket: QueryBucket::Activity,
        severity: SeverityMatch::AnyHigh,
        tone: Tone::Warning,
        template: activity_limit,
    },
    FallbackRule {
        bucket: QueryBucket::Activity,
        severity: SeverityMatch::Any,
        tone: Tone::Positive,
        template: activity_enjoy,
    },
    FallbackRule {
        bucket: QueryBucket::Status,
        severity: SeverityMatch::AqiHigh,
        tone: Tone::Warning,
        template: status_concerning,
    },
    FallbackRule {
        bucket: QueryBucket::Status,
        severity: SeverityMatch::Pm25Elevated,
        tone: Tone::Calm,
        template: status_moderate,
    },
    FallbackRule {
        bucket: QueryBucket::Status,
        severity: SeverityMatch::Any,
        tone: Tone::Positive,
        template: status_good,
    },
    FallbackRule {
        bucket: QueryBucket::Improvement,
        severity: SeverityMatch::AnyHigh,
        tone: Tone::Calm,
        template: improvement_wait,
    },
    FallbackRule {
        bucket: QueryBucket::Improvement,
        severity: SeverityMatch::Any,
        tone: Tone::Positive,
        template: improvement_already_good,
    },
    FallbackRule {
        bucket: QueryBucket::Causal,
        severity: SeverityMatch::AnyHigh,
        tone: Tone::Calm,
        template: causal_elevated,
    },
    FallbackRule {
        bucket: QueryBucket::Causal,
        severity: SeverityMatch::Any,
        tone: Tone::Calm,
        template: causal_clean,
    },
];

/// Deterministic fallback reply; never fails.
pub fn fallback_response(query: &str, reading: &AirQualityReading) -> AdvisoryResult {
    let severity = Severity::of(reading);

    let (reply_text, tone) = match classify_query(query) {
        Some(bucket) => {
            let rule = RULES
                .iter()
                .find(|rule| rule.bucket == bucket && rule.severity.matches(&severity))
                .expect("rule table covers every bucket unconditionally");
            ((rule.template)(reading), rule.tone)
        }
        None => (clarification(reading), Tone::Calm),
    };

    AdvisoryResult {
        reply_text,
        tone,
        confidence: BASE_CONFIDENCE,
        sources: SOURCES.iter().map(|s| s.to_string()).collect(),
        highlight_area: None,
    }
}

fn activity_limit(reading: &AirQualityReading) -> String {
    format!(
        "I'd recommend limiting outdoor activities in {} right now. PM2.5 is at {:.1} µg/m³, \
which exceeds the WHO guideline of 15. Consider indoor activities or wait until evening \
when air quality typically improves.",
        reading.location, reading.pm25
    )
}

fn activity_enjoy(reading: &AirQualityReading) -> String {
    format!(
        "Good news! Air quality in {} is acceptable for outdoor activities. PM2.5 is at \
{:.1} µg/m³. Enjoy your time outside, but keep monitoring the conditions.",
        reading.location, reading.pm25
    )
}

fn status_concerning(reading: &AirQualityReading) -> String {
    format!(
        "Air quality in {} is concerning today. The AQI is {}, with PM2.5 at {:.1} µg/m³. \
Sensitive groups should definitely limit outdoor exposure.",
        reading.location, reading.aqi, reading.pm25
    )
}

fn status_moderate(reading: &AirQualityReading) -> String {
    format!(
        "Air quality in {} is moderate. PM2.5 is slightly elevated at {:.1} µg/m³, above \
WHO's guideline. Most people can proceed normally, but sensitive individuals should be \
cautious.",
        reading.location, reading.pm25
    )
}

fn status_good(reading: &AirQualityReading) -> String {
    format!(
        "Air quality in {} looks good! PM2.5 is {:.1} µg/m³, which is within safe limits. \
It's a great day to be outside.",
        reading.location, reading.pm25
    )
}

fn improvement_wait(reading: &AirQualityReading) -> String {
    format!(
        "Conditions in {} usually ease by late evening as traffic drops off. PM2.5 is \
{:.1} µg/m³ right now, so give it a few hours and check back before heading out.",
        reading.location, reading.pm25
    )
}

fn improvement_already_good(reading: &AirQualityReading) -> String {
    format!(
        "Air quality in {} is already in good shape. PM2.5 is {:.1} µg/m³, within the WHO \
guideline, so there's no need to wait for an improvement.",
        reading.location, reading.pm25
    )
}

fn causal_elevated(reading: &AirQualityReading) -> String {
    format!(
        "Elevated readings in {} are typically driven by traffic emissions and still air \
trapping pollutants near the ground. PM2.5 is {:.1} µg/m³ and the AQI is {} right now.",
        reading.location, reading.pm25, reading.aqi
    )
}

fn causal_clean(reading: &AirQualityReading) -> String {
    format!(
        "Pollutant levels in {} are low at the moment, with PM2.5 at {:.1} µg/m³. Levels \
usually rise with morning traffic and settle again by evening.",
        reading.location, reading.pm25
    )
}

fn clarification(reading: &AirQualityReading) -> String {
    format!(
        "I'm analyzing air quality data for {}. Current PM2.5 is {:.1} µg/m³ and AQI is {}. \
Could you be more specific about what you'd like to know?",
        reading.location, reading.pm25, reading.aqi
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn test_classify_query_buckets() {
        assert_eq!(
            classify_query("Can the kids play outside?"),
            Some(QueryBucket::Activity)
        );
        assert_eq!(
            classify_query("How is the air quality today?"),
            Some(QueryBucket::Status)
        );
        assert_eq!(
            classify_query("When will conditions improve?"),
            Some(QueryBucket::Improvement)
        );
        assert_eq!(
            classify_query("Why is the air so bad?"),
            Some(QueryBucket::Causal)
        );
        assert_eq!(classify_query("Tell me a joke"), None);
    }

    #[test]
    fn test_earlier_bucket_wins_overlapping_keywords() {
        // "how" (status) appears before "improve" (improvement) in the
        // query, but bucket order decides: activity > status > improvement.
        assert_eq!(
            classify_query("How soon can we exercise outdoors?"),
            Some(QueryBucket::Activity)
        );
    }

    #[test]
    fn test_tone_thresholds() {
        assert_eq!(determine_tone(&reading(60.0, 0.0, 0.0)), Tone::Urgent);
        assert_eq!(determine_tone(&reading(40.0, 0.0, 0.0)), Tone::Warning);
        assert_eq!(determine_tone(&reading(10.0, 10.0, 20.0)), Tone::Positive);
        // pm25 unremarkable, aqi pushed past 100 by o3
        assert_eq!(determine_tone(&reading(10.0, 10.0, 250.0)), Tone::Warning);
        // pm25 between the positive and warning bands
        assert_eq!(determine_tone(&reading(20.0, 10.0, 30.0)), Tone::Calm);
    }

    #[test]
    fn test_confidence_penalties() {
        assert!((reading_confidence(&reading(40.0, 10.0, 30.0)) - 0.85).abs() < 1e-9);
        // pm25 implausible; the derived aqi also exceeds 500
        assert!((reading_confidence(&reading(600.0, 10.0, 30.0)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_outdoor_query_high_pm25_warns() {
        let result = fallback_response("Is it safe to play outdoor today?", &reading(82.0, 20.0, 45.0));
        assert_eq!(result.tone, Tone::Warning);
        assert!(result.reply_text.contains("82.0"));
        assert!(result.reply_text.contains("WHO guideline"));
    }

    #[test]
    fn test_outdoor_query_clean_air_positive() {
        let result = fallback_response("outdoor run?", &reading(10.0, 10.0, 20.0));
        assert_eq!(result.tone, Tone::Positive);
    }

    #[test]
    fn test_status_query_tones() {
        let concerning = fallback_response("air quality?", &reading(82.0, 20.0, 45.0));
        assert_eq!(concerning.tone, Tone::Warning);

        let moderate = fallback_response("air quality?", &reading(20.0, 5.0, 20.0));
        assert_eq!(moderate.tone, Tone::Calm);

        let good = fallback_response("air quality?", &reading(8.0, 5.0, 20.0));
        assert_eq!(good.tone, Tone::Positive);
    }

    #[test]
    fn test_unclassified_query_asks_for_clarification() {
        let result = fallback_response("Tell me a joke", &reading(40.0, 10.0, 30.0));
        assert_eq!(result.tone, Tone::Calm);
        assert!(result.reply_text.contains("more specific"));
    }

    #[test]
    fn test_fallback_carries_sources_and_confidence() {
        let result = fallback_response("how is it?", &reading(40.0, 10.0, 30.0));
        assert_eq!(result.sources, vec!["OpenAQ", "OpenWeatherMap", "WHO Guidelines"]);
        assert!((result.confidence - 0.85).abs() < 1e-9);
        assert!(result.highlight_area.is_none());
    }

    #[test]
    fn test_prompt_embeds_reading_and_query() {
        let prompt = build_prompt("Can I run?", &reading(82.0, 20.0, 45.0), None);
        assert!(prompt.contains("Kochi City Center"));
        assert!(prompt.contains("PM2.5: 82.0"));
        assert!(prompt.contains("WHO safe limit: 15"));
        assert!(prompt.contains("AQI: 273"));
        assert!(prompt.contains("\"Can I run?\""));
        assert!(!prompt.contains("Weather Conditions"));
    }

    #[test]
    fn test_prompt_includes_weather_when_available() {
        let weather = WeatherSnapshot {
            temperature_c: 31.0,
            humidity_pct: 74.0,
            wind_speed_ms: 3.4,
            wind_direction_deg: 220.0,
            pressure_hpa: 1008.0,
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
            timestamp: Utc::now(),
        };
        let prompt = build_prompt("Can I run?", &reading(82.0, 20.0, 45.0), Some(&weather));
        assert!(prompt.contains("Weather Conditions"));
        assert!(prompt.contains("31°C"));
    }
}
