//! Prediction models: upstream-computed outcome percentages and advice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::fixture::{Fixture, FixtureTeams};

/// One element of the `/predictions?fixture=...` response array.
///
/// There is at most one per fixture, and once cached it is treated as
/// authoritative for the life of the cache entry - the upstream does not
/// regenerate predictions for a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: Prediction,
    pub teams: FixtureTeams,
    #[serde(default)]
    pub comparison: HashMap<String, SidePair>,
    #[serde(default)]
    pub h2h: Vec<Fixture>,
}

impl PredictionResponse {
    /// The most recent head-to-head encounters, newest first.
    pub fn recent_h2h(&self, count: usize) -> &[Fixture] {
        &self.h2h[..self.h2h.len().min(count)]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub winner: PredictionWinner,
    #[serde(default)]
    pub win_or_draw: bool,
    #[serde(default)]
    pub under_over: Option<String>,
    #[serde(default)]
    pub goals: GoalForecast,
    pub advice: String,
    pub percent: PredictionPercent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionWinner {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub comment: Option<String>,
}

/// Forecast goal lines, e.g. `"-2.5"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalForecast {
    pub home: Option<String>,
    pub away: Option<String>,
}

/// Outcome percentages as upstream-formatted strings, e.g. `"45%"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPercent {
    pub home: String,
    pub draw: String,
    pub away: String,
}

/// A home/away value pair from the comparison table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidePair {
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub away: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREDICTION_JSON: &str = r#"{
        "predictions": {
            "winner": { "id": 42, "name": "Arsenal", "comment": "Win or draw" },
            "win_or_draw": true,
            "under_over": "-3.5",
            "goals": { "home": "-2.5", "away": "-1.5" },
            "advice": "Combo Double chance : Arsenal or draw and -3.5 goals",
            "percent": { "home": "45%", "draw": "30%", "away": "25%" }
        },
        "teams": {
            "home": { "id": 42, "name": "Arsenal", "logo": null },
            "away": { "id": 33, "name": "Manchester United", "logo": null }
        },
        "comparison": {
            "form": { "home": "55%", "away": "45%" },
            "att": { "home": "60%", "away": "40%" }
        },
        "h2h": []
    }"#;

    #[test]
    fn test_parse_prediction() {
        let prediction: PredictionResponse =
            serde_json::from_str(PREDICTION_JSON).expect("parse prediction");
        assert_eq!(prediction.predictions.percent.home, "45%");
        assert_eq!(prediction.predictions.winner.id, Some(42));
        assert!(prediction.predictions.advice.contains("Double chance"));
        assert_eq!(prediction.comparison["form"].home, "55%");
        assert!(prediction.recent_h2h(3).is_empty());
    }

    #[test]
    fn test_winner_may_be_null_fields() {
        let json = r#"{
            "predictions": {
                "winner": { "id": null, "name": null, "comment": null },
                "win_or_draw": false,
                "under_over": null,
                "goals": { "home": null, "away": null },
                "advice": "No predictions available",
                "percent": { "home": "33%", "draw": "34%", "away": "33%" }
            },
            "teams": {
                "home": { "id": 1, "name": "A" },
                "away": { "id": 2, "name": "B" }
            }
        }"#;
        let prediction: PredictionResponse = serde_json::from_str(json).expect("parse");
        assert!(prediction.predictions.winner.id.is_none());
        assert!(prediction.h2h.is_empty());
    }
}
