//! Fixture models: one scheduled or played match.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One match as returned by `/fixtures?date=...`.
///
/// Immutable snapshot: produced by the API client, never mutated after fetch.
/// Head-to-head history inside predictions reuses this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture: FixtureMeta,
    pub league: League,
    pub teams: FixtureTeams,
    #[serde(default)]
    pub goals: Goals,
}

impl Fixture {
    pub fn id(&self) -> i64 {
        self.fixture.id
    }

    /// Kickoff time as `HH:MM` UTC for listings.
    pub fn kickoff_display(&self) -> String {
        self.fixture.date.format("%H:%M").to_string()
    }
}

/// Match identity, kickoff, and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureMeta {
    pub id: i64,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub status: FixtureStatus,
}

/// Status code pair, e.g. `NS` / "Not Started", `FT` / "Match Finished".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureStatus {
    pub long: String,
    pub short: String,
    #[serde(default)]
    pub elapsed: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub season: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureTeams {
    pub home: Team,
    pub away: Team,
}

/// Score so far; `None` before kickoff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Goals {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

impl Goals {
    pub fn display(&self) -> String {
        match (self.home, self.away) {
            (Some(home), Some(away)) => format!("{} : {}", home, away),
            _ => "- : -".to_string(),
        }
    }
}

/// The three dates the fixture browser works over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub yesterday: NaiveDate,
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
}

impl DateWindow {
    pub fn around(today: NaiveDate) -> Self {
        Self {
            yesterday: today.pred_opt().unwrap_or(today),
            today,
            tomorrow: today.succ_opt().unwrap_or(today),
        }
    }

    pub fn current() -> Self {
        Self::around(Utc::now().date_naive())
    }
}

/// Restrict a day's fixture list to one league.
pub fn filter_by_league(fixtures: &[Fixture], league_id: i64) -> Vec<&Fixture> {
    fixtures.iter().filter(|f| f.league.id == league_id).collect()
}
