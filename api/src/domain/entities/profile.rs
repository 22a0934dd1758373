//! User profile domain entity
//!
//! A profile aggregates a user's judge identities, the stats pulled from them and
//! a day-granular history of total solved counts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PlatformIdentity, PlatformStats};

/// Unique identifier for a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One point of a profile's performance graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub date: NaiveDate,
    pub solved_count: i64,
}

/// A user profile with everything the sync pipeline maintains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    /// Sum of the solved counts committed by the most recent sync
    pub total_solved: i64,
    pub rank_placement: Option<i32>,
    pub platforms: Vec<PlatformIdentity>,
    pub stats: Vec<PlatformStats>,
    /// Ordered by date, oldest first
    pub history: Vec<PerformanceSample>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    #[cfg(test)]
    pub fn stats_for(&self, platform: super::Platform) -> Option<&PlatformStats> {
        self.stats.iter().find(|s| s.platform == platform)
    }
}

/// Data for creating a new profile
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub username: String,
}

/// Leaderboard projection of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: UserId,
    pub username: String,
    pub total_solved: i64,
    pub rank_placement: Option<i32>,
}
