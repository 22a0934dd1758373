//! Leaderboard service
//!
//! Ranks profiles by total solved count with competition ranking: tied totals
//! share a placement and the next placement skips ahead (1, 2, 2, 4).

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{ProfileSummary, UserId};
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub placement: i32,
    pub user_id: UserId,
    pub username: String,
    pub total_solved: i64,
}

pub struct LeaderboardService<PR>
where
    PR: ProfileRepository,
{
    profiles: Arc<PR>,
}

impl<PR> LeaderboardService<PR>
where
    PR: ProfileRepository,
{
    pub fn new(profiles: Arc<PR>) -> Self {
        Self { profiles }
    }

    /// Top `limit` entries
    pub async fn standings(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, AppError> {
        let standings = self.profiles.list_standings().await?;
        Ok(rank(&standings).into_iter().take(limit).collect())
    }

    /// Recompute every placement and persist the ones that changed.
    /// Returns the number of profiles updated.
    pub async fn refresh_placements(&self) -> Result<usize, AppError> {
        let standings = self.profiles.list_standings().await?;
        let mut updated = 0;

        for (summary, entry) in standings.iter().zip(rank(&standings)) {
            if summary.rank_placement != Some(entry.placement) {
                self.profiles
                    .update_rank_placement(&summary.id, entry.placement)
                    .await?;
                updated += 1;
            }
        }

        tracing::debug!(profiles = standings.len(), updated, "Refreshed leaderboard placements");
        Ok(updated)
    }
}

/// Assign placements to standings already sorted by total descending
fn rank(standings: &[ProfileSummary]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(standings.len());

    for (i, summary) in standings.iter().enumerate() {
        let placement = match entries.last() {
            Some(prev) if prev.total_solved == summary.total_solved => prev.placement,
            _ => i as i32 + 1,
        };
        entries.push(LeaderboardEntry {
            placement,
            user_id: summary.id,
            username: summary.username.clone(),
            total_solved: summary.total_solved,
        });
    }

    entries
}
