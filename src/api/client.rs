//! API client for the football data service.
//!
//! Each read operation follows the same shape: derive the cache key from the
//! request identity, serve a fresh cached value if present, otherwise issue
//! exactly one authenticated GET and normalize the outcome. Failures and
//! structurally empty payloads both come back as empty values, but only
//! non-empty successes are written to the cache - an empty day of fixtures
//! is worth re-checking later, a confirmed list is not.

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::CacheManager;
use crate::models::{Fixture, PredictionResponse, TeamStatistics};

use super::ApiError;

/// Production base URL for the football data API.
const API_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Fixed credential header expected by the upstream.
const API_KEY_HEADER: &str = "x-apisports-key";

/// HTTP request timeout in seconds. The layer adds no timeout of its own
/// beyond this transport-level one.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Cache key for a day of fixtures.
pub(crate) fn fixtures_key(date: NaiveDate) -> String {
    format!("fixtures_{}", date.format("%Y-%m-%d"))
}

/// Cache key for a fixture's prediction.
pub(crate) fn prediction_key(fixture_id: i64) -> String {
    format!("pred_{}", fixture_id)
}

/// Cache key for a (team, league, season) statistics record.
pub(crate) fn statistics_key(team: i64, league: i64, season: i32) -> String {
    format!("stats_{}_{}_{}", team, league, season)
}

/// API client for the football data service.
/// Clone is cheap - reqwest::Client pools connections behind an Arc, and the
/// cache manager shares its store the same way.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    cache: CacheManager,
}

impl ApiClient {
    pub fn new(api_key: impl Into<String>, cache: CacheManager) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE_URL, cache)
    }

    /// Build a client against a non-default base URL (test servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        cache: CacheManager,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            cache,
        })
    }

    /// Fetch all fixtures for a calendar date.
    ///
    /// An empty list can mean either "no matches that day" or a recovered
    /// failure; both are returned as-is and neither is cached, so the next
    /// call re-checks upstream for late-arriving data.
    pub async fn fetch_fixtures(&self, date: NaiveDate) -> Vec<Fixture> {
        let key = fixtures_key(date);
        if let Some(cached) = self.cache.load::<Vec<Fixture>>(&key) {
            debug!(key, "Fixtures served from cache");
            return cached;
        }

        let date_param = date.format("%Y-%m-%d").to_string();
        let text = match self.get("/fixtures", &[("date", date_param)]).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, %date, "Fixtures request failed");
                return Vec::new();
            }
        };

        let fixtures = parse_response_list::<Fixture>(&text);
        if !fixtures.is_empty() {
            self.cache.save(&key, &fixtures);
        }
        fixtures
    }

    /// Fetch the prediction for a fixture. At most one exists per fixture;
    /// a cached prediction is authoritative for the life of the entry.
    pub async fn fetch_prediction(&self, fixture_id: i64) -> Option<PredictionResponse> {
        let key = prediction_key(fixture_id);
        if let Some(cached) = self.cache.load::<PredictionResponse>(&key) {
            debug!(key, "Prediction served from cache");
            return Some(cached);
        }

        let text = match self
            .get("/predictions", &[("fixture", fixture_id.to_string())])
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, fixture_id, "Prediction request failed");
                return None;
            }
        };

        let prediction = parse_response_list::<PredictionResponse>(&text)
            .into_iter()
            .next()?;
        self.cache.save(&key, &prediction);
        Some(prediction)
    }

    /// Fetch the statistics record for a (team, league, season) tuple.
    ///
    /// A successful record with zero played matches is still cached - it is
    /// a legitimate result for a season that has not started.
    pub async fn fetch_team_statistics(
        &self,
        team: i64,
        league: i64,
        season: i32,
    ) -> Option<TeamStatistics> {
        self.statistics_inner(team, league, season, false).await
    }

    /// Like [`Self::fetch_team_statistics`], but a cached record only counts
    /// as a hit when it has at least one played match. A stored zero-played
    /// record is re-checked upstream because it may become non-zero once the
    /// season begins.
    pub async fn fetch_team_statistics_requiring_play(
        &self,
        team: i64,
        league: i64,
        season: i32,
    ) -> Option<TeamStatistics> {
        self.statistics_inner(team, league, season, true).await
    }

    async fn statistics_inner(
        &self,
        team: i64,
        league: i64,
        season: i32,
        require_played: bool,
    ) -> Option<TeamStatistics> {
        let key = statistics_key(team, league, season);
        if let Some(cached) = self.cache.load::<TeamStatistics>(&key) {
            if !require_played || cached.matches_played() > 0 {
                debug!(key, "Statistics served from cache");
                return Some(cached);
            }
            debug!(key, "Cached statistics have no played matches, re-checking upstream");
        }

        let text = match self
            .get(
                "/teams/statistics",
                &[
                    ("league", league.to_string()),
                    ("season", season.to_string()),
                    ("team", team.to_string()),
                ],
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, team, league, season, "Statistics request failed");
                return None;
            }
        };

        let stats = parse_statistics(&text)?;
        self.cache.save(&key, &stats);
        Some(stats)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }
        Ok(text)
    }
}

/// Parse the standard `{ "response": [...] }` envelope. A malformed body is
/// a recovered failure: logged and returned as empty.
fn parse_response_list<T: DeserializeOwned>(text: &str) -> Vec<T> {
    #[derive(Deserialize)]
    #[serde(bound(deserialize = "T: DeserializeOwned"))]
    struct Envelope<T> {
        #[serde(default)]
        response: Vec<T>,
    }

    match serde_json::from_str::<Envelope<T>>(text) {
        Ok(envelope) => envelope.response,
        Err(e) => {
            warn!(error = %e, "Malformed upstream payload");
            Vec::new()
        }
    }
}

/// Statistics come back as `{ "response": { ... } }` - an object rather than
/// an array, and an empty object when the tuple has no data. Anything that
/// does not decode as a statistics record is absent.
fn parse_statistics(text: &str) -> Option<TeamStatistics> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default)]
        response: serde_json::Value,
    }

    let envelope = match serde_json::from_str::<Envelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Malformed statistics payload");
            return None;
        }
    };
    if !envelope.response.is_object() {
        return None;
    }
    match serde_json::from_value::<TeamStatistics>(envelope.response) {
        Ok(stats) => Some(stats),
        Err(e) => {
            debug!(error = %e, "Statistics response object not decodable, treating as absent");
            None
        }
    }
}
