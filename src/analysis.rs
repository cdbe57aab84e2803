//! Per-fixture analysis orchestration.
//!
//! The pipeline per fixture is strictly ordered: prediction first (no
//! prediction means no analysis at all), then both teams' statistics
//! concurrently, then the narrative once both statistics settle. Pipelines
//! for different fixtures are independent - one fixture's narrative step
//! never blocks another fixture's earlier steps.

use thiserror::Error;

use crate::api::ApiClient;
use crate::models::{Fixture, PredictionResponse, TeamStatistics};
use crate::narrative::{Narrative, NarrativeGenerator};
use crate::stats::StatsResolver;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no analysis available for fixture {0}")]
    NoPrediction(i64),
}

/// The aggregate result of one fixture's lookup chain.
#[derive(Debug, Clone)]
pub struct MatchAnalysis {
    pub fixture: Fixture,
    pub prediction: PredictionResponse,
    pub home_stats: Option<TeamStatistics>,
    pub away_stats: Option<TeamStatistics>,
    pub narrative: Narrative,
}

/// Sequences the upstream client, statistics resolver, and narrative
/// generator into one per-fixture workflow.
#[derive(Clone)]
pub struct Analyzer {
    client: ApiClient,
    stats: StatsResolver,
    narrative: NarrativeGenerator,
}

impl Analyzer {
    pub fn new(client: ApiClient, stats: StatsResolver, narrative: NarrativeGenerator) -> Self {
        Self {
            client,
            stats,
            narrative,
        }
    }

    /// Run the full lookup chain for one fixture.
    ///
    /// Fails only when no prediction exists upstream; statistics may each be
    /// independently absent (one side's failure never cancels the other),
    /// and the narrative degrades rather than failing.
    pub async fn analyze(&self, fixture: &Fixture) -> Result<MatchAnalysis, AnalysisError> {
        let fixture_id = fixture.id();
        let prediction = self
            .client
            .fetch_prediction(fixture_id)
            .await
            .ok_or(AnalysisError::NoPrediction(fixture_id))?;

        let league = fixture.league.id;
        let season = fixture.league.season;
        let (home_stats, away_stats) = tokio::join!(
            self.stats.resolve(fixture.teams.home.id, league, season),
            self.stats.resolve(fixture.teams.away.id, league, season),
        );

        let narrative = self
            .narrative
            .generate(fixture, &prediction, home_stats.as_ref(), away_stats.as_ref())
            .await;

        Ok(MatchAnalysis {
            fixture: fixture.clone(),
            prediction,
            home_stats,
            away_stats,
            narrative,
        })
    }

    /// Analyze many fixtures concurrently, one independent pipeline each.
    pub async fn analyze_all(
        &self,
        fixtures: &[Fixture],
    ) -> Vec<Result<MatchAnalysis, AnalysisError>> {
        futures::future::join_all(fixtures.iter().map(|fixture| self.analyze(fixture))).await
    }
}
