//! Judge platform domain entities
//!
//! Identities link a profile to an account on an external judge; stats are the
//! normalized numbers pulled from that judge on the last successful sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported coding-judge platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Leetcode,
    Codeforces,
    Hackerrank,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Leetcode, Platform::Codeforces, Platform::Hackerrank];

    /// Human-readable platform name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Leetcode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::Hackerrank => "HackerRank",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Leetcode => write!(f, "leetcode"),
            Platform::Codeforces => write!(f, "codeforces"),
            Platform::Hackerrank => write!(f, "hackerrank"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leetcode" => Ok(Platform::Leetcode),
            "codeforces" => Ok(Platform::Codeforces),
            "hackerrank" => Ok(Platform::Hackerrank),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// A profile's account on one judge platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformIdentity {
    pub platform: Platform,
    pub external_username: String,
}

impl PlatformIdentity {
    pub fn new(platform: Platform, external_username: impl Into<String>) -> Self {
        Self {
            platform,
            external_username: external_username.into(),
        }
    }

    /// Identities with a blank username are skipped by sync
    pub fn is_configured(&self) -> bool {
        !self.external_username.trim().is_empty()
    }
}

/// Normalized result of a single adapter call.
///
/// Fields a judge does not expose stay `None`; a solved count of zero is a real
/// value and never means "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchedStats {
    pub solved_count: i64,
    /// Numeric global position (e.g. LeetCode ranking)
    pub rank: Option<i64>,
    /// Textual rank (e.g. Codeforces "expert")
    pub rank_title: Option<String>,
    pub rating: Option<f64>,
    pub contests_participated: Option<i64>,
}

impl FetchedStats {
    pub fn solved(solved_count: i64) -> Self {
        Self {
            solved_count,
            ..Default::default()
        }
    }

    /// Stamp the result into a stats record for persistence
    pub fn into_stats(self, platform: Platform, synced_at: DateTime<Utc>) -> PlatformStats {
        PlatformStats {
            platform,
            solved_count: self.solved_count,
            rank: self.rank,
            rank_title: self.rank_title,
            rating: self.rating,
            contests_participated: self.contests_participated,
            last_synced_at: synced_at,
        }
    }
}

/// Stats for one platform as of its last successful sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub platform: Platform,
    pub solved_count: i64,
    pub rank: Option<i64>,
    pub rank_title: Option<String>,
    pub rating: Option<f64>,
    pub contests_participated: Option<i64>,
    pub last_synced_at: DateTime<Utc>,
}
