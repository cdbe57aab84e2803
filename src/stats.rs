//! Season-fallback policy over the team statistics endpoint.

use tracing::debug;

use crate::api::ApiClient;
use crate::models::TeamStatistics;

/// Resolves a usable statistics record for a team, stepping back one season
/// when the requested one has not been played yet.
#[derive(Clone)]
pub struct StatsResolver {
    client: ApiClient,
}

impl StatsResolver {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch statistics for the requested season; if the record is absent or
    /// reports zero played matches, retry once against the previous season
    /// and return whatever that yields. Exactly one fallback hop - there is
    /// no recursive walk further back.
    pub async fn resolve(
        &self,
        team: i64,
        league: i64,
        season: i32,
    ) -> Option<TeamStatistics> {
        if let Some(stats) = self
            .client
            .fetch_team_statistics_requiring_play(team, league, season)
            .await
        {
            if stats.matches_played() > 0 {
                return Some(stats);
            }
        }

        debug!(team, league, season, "Season has no played matches, falling back one season");
        self.client
            .fetch_team_statistics(team, league, season - 1)
            .await
    }
}
