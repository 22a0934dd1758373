//! Tournament domain entity
//!
//! Tournaments are normalized contest listings. They are fetched fresh per
//! request and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament category, inferred from the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentCategory {
    Competition,
    Hackathon,
}

impl TournamentCategory {
    /// Keyword heuristic: anything titled "hackathon" is a hackathon
    pub fn infer(title: &str) -> Self {
        if title.to_lowercase().contains("hackathon") {
            TournamentCategory::Hackathon
        } else {
            TournamentCategory::Competition
        }
    }
}

impl std::fmt::Display for TournamentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentCategory::Competition => write!(f, "Competition"),
            TournamentCategory::Hackathon => write!(f, "Hackathon"),
        }
    }
}

impl std::str::FromStr for TournamentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "competition" => Ok(TournamentCategory::Competition),
            "hackathon" => Ok(TournamentCategory::Hackathon),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Contest phase as reported upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
    Unknown,
}

impl ContestPhase {
    /// Lenient parse; unrecognized phases map to `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BEFORE" => ContestPhase::Before,
            "CODING" => ContestPhase::Coding,
            "PENDING_SYSTEM_TEST" => ContestPhase::PendingSystemTest,
            "SYSTEM_TEST" => ContestPhase::SystemTest,
            "FINISHED" => ContestPhase::Finished,
            _ => ContestPhase::Unknown,
        }
    }
}

/// A contest listing in the common shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub title: String,
    pub host_platform: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: i64,
    pub registration_url: String,
    pub category: TournamentCategory,
    /// Unknown for most upstreams
    pub participant_count: Option<u64>,
    pub phase: ContestPhase,
    pub description: String,
}

impl Tournament {
    pub fn duration_bucket(&self) -> DurationBucket {
        DurationBucket::of_seconds(self.duration_seconds)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> StatusBucket {
        if self.phase == ContestPhase::Coding || (now > self.start_time && now < self.end_time) {
            StatusBucket::Ongoing
        } else {
            StatusBucket::Upcoming
        }
    }
}

/// Duration filter buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    /// Up to 3 hours
    Short,
    /// Up to 24 hours
    Medium,
    Long,
}

impl DurationBucket {
    pub fn of_seconds(seconds: i64) -> Self {
        const HOUR: i64 = 3600;
        if seconds <= 3 * HOUR {
            DurationBucket::Short
        } else if seconds <= 24 * HOUR {
            DurationBucket::Medium
        } else {
            DurationBucket::Long
        }
    }
}

impl std::str::FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(DurationBucket::Short),
            "medium" => Ok(DurationBucket::Medium),
            "long" => Ok(DurationBucket::Long),
            _ => Err(format!("Unknown duration bucket: {}", s)),
        }
    }
}

/// Status filter buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBucket {
    Upcoming,
    Ongoing,
}

impl std::str::FromStr for StatusBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(StatusBucket::Upcoming),
            "ongoing" => Ok(StatusBucket::Ongoing),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Client-side tournament filter. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TournamentFilter {
    pub category: Option<TournamentCategory>,
    pub platform: Option<String>,
    pub duration: Option<DurationBucket>,
    pub status: Option<StatusBucket>,
    pub search: Option<String>,
}

impl TournamentFilter {
    pub fn matches(&self, tournament: &Tournament, now: DateTime<Utc>) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if !tournament.title.to_lowercase().contains(&term)
                && !tournament.host_platform.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if self.category.is_some_and(|c| c != tournament.category) {
            return false;
        }

        if let Some(platform) = &self.platform {
            if !platform.eq_ignore_ascii_case(&tournament.host_platform) {
                return false;
            }
        }

        if self
            .duration
            .is_some_and(|d| d != tournament.duration_bucket())
        {
            return false;
        }

        !self.status.is_some_and(|s| s != tournament.status_at(now))
    }

    /// Filter without touching the input
    pub fn apply(&self, tournaments: &[Tournament], now: DateTime<Utc>) -> Vec<Tournament> {
        tournaments
            .iter()
            .filter(|t| self.matches(t, now))
            .cloned()
            .collect()
    }
}

/// Distinct host platforms in first-seen order
pub fn host_platforms(tournaments: &[Tournament]) -> Vec<String> {
    let mut platforms: Vec<String> = Vec::new();
    for t in tournaments {
        if !platforms.iter().any(|p| p == &t.host_platform) {
            platforms.push(t.host_platform.clone());
        }
    }
    platforms
}
