//! Shared harness for integration tests: a mock upstream plus a client
//! wired to an in-memory cache.

// Each integration test binary compiles this module separately and uses a
// different subset of the helpers.
#![allow(dead_code)]

use std::sync::Arc;

use pitchcache::api::ApiClient;
use pitchcache::cache::{CacheManager, Freshness, MemoryStore};
use pitchcache::models::Fixture;
use serde_json::{json, Value};
use wiremock::MockServer;

pub struct TestContext {
    pub server: MockServer,
    pub cache: CacheManager,
    pub client: ApiClient,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let cache = CacheManager::new(Arc::new(MemoryStore::new()), Freshness::max_age_hours(24));
        let client = ApiClient::with_base_url("test-key", server.uri(), cache.clone())
            .expect("build client");
        Self {
            server,
            cache,
            client,
        }
    }
}

/// Wrap items in the upstream's standard response envelope.
pub fn envelope(items: Vec<Value>) -> Value {
    json!({
        "get": "test",
        "parameters": {},
        "errors": [],
        "results": items.len(),
        "paging": { "current": 1, "total": 1 },
        "response": items
    })
}

/// Statistics use an object-valued `response` rather than an array.
pub fn statistics_envelope(stats: Value) -> Value {
    json!({
        "get": "teams/statistics",
        "parameters": {},
        "errors": [],
        "results": 11,
        "paging": { "current": 1, "total": 1 },
        "response": stats
    })
}

pub fn fixture_json(id: i64, home_id: i64, away_id: i64, league_id: i64, season: i32) -> Value {
    json!({
        "fixture": {
            "id": id,
            "referee": null,
            "timezone": "UTC",
            "date": "2025-08-16T14:00:00+00:00",
            "timestamp": 1755352800,
            "status": { "long": "Not Started", "short": "NS", "elapsed": null }
        },
        "league": {
            "id": league_id,
            "name": "Premier League",
            "country": "England",
            "logo": null,
            "flag": null,
            "season": season
        },
        "teams": {
            "home": { "id": home_id, "name": format!("Home FC {}", home_id), "logo": null },
            "away": { "id": away_id, "name": format!("Away FC {}", away_id), "logo": null }
        },
        "goals": { "home": null, "away": null }
    })
}

pub fn prediction_json(home_name: &str, away_name: &str) -> Value {
    json!({
        "predictions": {
            "winner": { "id": 1, "name": home_name, "comment": null },
            "win_or_draw": true,
            "under_over": null,
            "goals": { "home": "-2.5", "away": "-1.5" },
            "advice": format!("Double chance : {} or draw", home_name),
            "percent": { "home": "50%", "draw": "30%", "away": "20%" }
        },
        "teams": {
            "home": { "id": 1, "name": home_name, "logo": null },
            "away": { "id": 2, "name": away_name, "logo": null }
        },
        "comparison": {
            "form": { "home": "60%", "away": "40%" }
        },
        "h2h": []
    })
}

pub fn statistics_json(team_id: i64, played: i32) -> Value {
    json!({
        "league": { "id": 39, "name": "Premier League", "season": 2025 },
        "team": { "id": team_id, "name": format!("Team {}", team_id), "logo": null },
        "form": if played > 0 { "WWDLW" } else { "" },
        "fixtures": {
            "played": { "home": played / 2, "away": played - played / 2, "total": played },
            "wins": { "home": 0, "away": 0, "total": 0 },
            "draws": { "home": 0, "away": 0, "total": 0 },
            "loses": { "home": 0, "away": 0, "total": 0 }
        },
        "goals": {
            "for": {
                "total": { "home": 0, "away": 0, "total": 0 },
                "average": { "home": "0.0", "away": "0.0", "total": "0.0" }
            },
            "against": {
                "total": { "home": 0, "away": 0, "total": 0 },
                "average": { "home": "0.0", "away": "0.0", "total": "0.0" }
            }
        }
    })
}

pub fn sample_fixture(id: i64, home_id: i64, away_id: i64, league_id: i64, season: i32) -> Fixture {
    serde_json::from_value(fixture_json(id, home_id, away_id, league_id, season))
        .expect("build fixture")
}

/// A minimal successful `generateContent` response body.
pub fn generative_response(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [{ "text": text }], "role": "model" } }
        ]
    })
}
