//! Team statistics models: per (team, league, season) aggregates.

use serde::{Deserialize, Serialize};

use super::fixture::{League, Team};

/// Aggregate record from `/teams/statistics`.
///
/// A season that has not started yet legitimately reports zero played
/// matches - that is a valid, cacheable result, distinct from a transient
/// fetch error (which is represented by absence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team: Team,
    #[serde(default)]
    pub league: Option<League>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub fixtures: FixtureRecord,
    #[serde(default)]
    pub goals: GoalsRecord,
}

impl TeamStatistics {
    /// Total matches played this season across home and away.
    pub fn matches_played(&self) -> i32 {
        self.fixtures.played.total.unwrap_or(0)
    }

    /// Recent form string ("WWDLW"), or "N/A" when the season has no data.
    pub fn form_display(&self) -> &str {
        match self.form.as_deref() {
            Some(form) if !form.is_empty() => form,
            _ => "N/A",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureRecord {
    #[serde(default)]
    pub played: SplitTotal,
    #[serde(default)]
    pub wins: SplitTotal,
    #[serde(default)]
    pub draws: SplitTotal,
    #[serde(default)]
    pub loses: SplitTotal,
}

/// Home/away/total counter triple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitTotal {
    pub home: Option<i32>,
    pub away: Option<i32>,
    pub total: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalsRecord {
    #[serde(rename = "for", default)]
    pub scored: GoalTally,
    #[serde(default)]
    pub against: GoalTally,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalTally {
    #[serde(default)]
    pub total: SplitTotal,
    #[serde(default)]
    pub average: SplitAverage,
}

/// Upstream formats averages as strings, e.g. `"1.8"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitAverage {
    pub home: Option<String>,
    pub away: Option<String>,
    pub total: Option<String>,
}
