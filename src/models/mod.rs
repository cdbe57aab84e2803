//! Data models for upstream football data.
//!
//! Shapes follow the API-Football v3 wire format:
//!
//! - `Fixture`: a scheduled or played match with league, teams, and score
//! - `PredictionResponse`: win/draw/away percentages, advice, comparison
//!   metrics, and head-to-head history for one fixture
//! - `TeamStatistics`: per team/league/season aggregates
//!
//! All models are immutable snapshots produced by the API client; unknown
//! upstream fields are ignored and nullable fields are `Option`.

pub mod fixture;
pub mod prediction;
pub mod statistics;

pub use fixture::{filter_by_league, DateWindow, Fixture, FixtureMeta, FixtureStatus, FixtureTeams, Goals, League, Team};
pub use prediction::{GoalForecast, Prediction, PredictionPercent, PredictionResponse, PredictionWinner, SidePair};
pub use statistics::{FixtureRecord, GoalTally, GoalsRecord, SplitAverage, SplitTotal, TeamStatistics};
