//! AI-generated tactical reports for fixtures.
//!
//! Reports are produced once per fixture and pinned in the cache forever -
//! they are never regenerated, and unlike fixture or statistics entries they
//! are exempt from the freshness policy. Every failure mode degrades to a
//! fixed message carried as a tagged [`Narrative`] variant so callers (and
//! tests) can tell the reason apart from the prose.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::cache::CacheManager;
use crate::models::{Fixture, PredictionResponse, TeamStatistics};

/// Production base URL for the generative-text API.
const GENERATIVE_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier for report generation.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// HTTP request timeout in seconds. Text generation is slower than the data
/// API, so this is deliberately more generous.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Cache key for a fixture's tactical report.
pub(crate) fn narrative_key(fixture_id: i64) -> String {
    format!("narrative_{}", fixture_id)
}

/// Why a report could not be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    /// No generative API key is configured; the API was not called.
    MissingCredential,
    /// One or both statistics records were absent; the API was not called.
    InsufficientData,
    /// The generative call failed or returned nothing usable.
    ModelOffline,
}

impl DegradedReason {
    /// The fixed user-facing text for this degradation.
    pub fn text(&self) -> &'static str {
        match self {
            DegradedReason::MissingCredential => {
                "Tactical reports are disabled: no generative API key is configured."
            }
            DegradedReason::InsufficientData => {
                "Not enough team statistics to build a tactical report for this fixture."
            }
            DegradedReason::ModelOffline => {
                "Tactical intelligence is offline. The report could not be generated; try again later."
            }
        }
    }
}

/// A tactical report, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narrative {
    Report(String),
    Degraded(DegradedReason),
}

impl Narrative {
    pub fn text(&self) -> &str {
        match self {
            Narrative::Report(text) => text,
            Narrative::Degraded(reason) => reason.text(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Narrative::Degraded(_))
    }
}

/// Generates and caches one tactical report per fixture.
/// Clone is cheap - the HTTP client and cache store are shared behind Arcs.
#[derive(Clone)]
pub struct NarrativeGenerator {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    cache: CacheManager,
}

impl NarrativeGenerator {
    pub fn new(api_key: Option<String>, model: String, cache: CacheManager) -> Result<Self> {
        Self::with_base_url(api_key, model, GENERATIVE_BASE_URL, cache)
    }

    /// Build a generator against a non-default base URL (test servers).
    pub fn with_base_url(
        api_key: Option<String>,
        model: String,
        base_url: impl Into<String>,
        cache: CacheManager,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
            model,
            cache,
        })
    }

    /// Return the fixture's tactical report, generating it on first use.
    ///
    /// A cached report is returned verbatim with no generative call,
    /// irrespective of how much time has passed since it was produced.
    /// Degraded outcomes are never cached, so a later attempt can retry.
    pub async fn generate(
        &self,
        fixture: &Fixture,
        prediction: &PredictionResponse,
        home_stats: Option<&TeamStatistics>,
        away_stats: Option<&TeamStatistics>,
    ) -> Narrative {
        let key = narrative_key(fixture.id());
        if let Some(cached) = self.cache.load_pinned::<String>(&key) {
            debug!(key, "Narrative served from cache");
            return Narrative::Report(cached);
        }

        let Some(ref api_key) = self.api_key else {
            warn!("Generative API key not configured, narrative degraded");
            return Narrative::Degraded(DegradedReason::MissingCredential);
        };
        let (Some(home_stats), Some(away_stats)) = (home_stats, away_stats) else {
            debug!(fixture_id = fixture.id(), "Statistics incomplete, narrative degraded");
            return Narrative::Degraded(DegradedReason::InsufficientData);
        };

        let prompt = build_prompt(fixture, prediction, home_stats, away_stats);
        match self.call_model(api_key, &prompt).await {
            Ok(text) if !text.trim().is_empty() => {
                self.cache.save(&key, &text);
                Narrative::Report(text)
            }
            Ok(_) => {
                warn!(fixture_id = fixture.id(), "Generative API returned empty text");
                Narrative::Degraded(DegradedReason::ModelOffline)
            }
            Err(e) => {
                warn!(error = %e, fixture_id = fixture.id(), "Generative call failed");
                Narrative::Degraded(DegradedReason::ModelOffline)
            }
        }
    }

    async fn call_model(&self, api_key: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .context("Failed to send generative request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Generative API returned {}: {}",
                status,
                &body[..body.len().min(200)]
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse generative response")?;
        extract_candidate_text(&body)
    }
}

/// Pull the first candidate's text out of a `generateContent` response.
fn extract_candidate_text(body: &serde_json::Value) -> Result<String> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(|text| text.as_str())
        .map(|text| text.to_string())
        .ok_or_else(|| anyhow!("Generative response carried no candidate text"))
}

/// Compose the analysis prompt from both teams' names, their recent form,
/// and the upstream prediction's advice and percentages.
fn build_prompt(
    fixture: &Fixture,
    prediction: &PredictionResponse,
    home_stats: &TeamStatistics,
    away_stats: &TeamStatistics,
) -> String {
    format!(
        "Analyze this football match as a tactical expert.\n\
         Match: {} vs {}\n\
         Home form: {}\n\
         Away form: {}\n\
         Advice: {}\n\
         Win probabilities: home {} / draw {} / away {}\n\
         Write one professional, concise paragraph about the tactics and what to expect.",
        fixture.teams.home.name,
        fixture.teams.away.name,
        home_stats.form_display(),
        away_stats.form_display(),
        prediction.predictions.advice,
        prediction.predictions.percent.home,
        prediction.predictions.percent.draw,
        prediction.predictions.percent.away,
    )
}
