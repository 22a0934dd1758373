//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{Duration, Utc};

use crate::domain::entities::{
    ContestPhase, Platform, PlatformIdentity, Tournament, TournamentCategory, UserId, UserProfile,
};

/// Create a test profile with no identities
pub fn test_profile() -> UserProfile {
    test_profile_named("test-user")
}

/// Create a test profile with a specific username
pub fn test_profile_named(username: &str) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: UserId::new(),
        username: username.to_string(),
        total_solved: 0,
        rank_placement: None,
        platforms: vec![],
        stats: vec![],
        history: vec![],
        created_at: now,
        updated_at: now,
    }
}

/// Create a test profile with the given platform usernames
pub fn test_profile_with(platforms: &[(Platform, &str)]) -> UserProfile {
    let mut profile = test_profile();
    profile.platforms = platforms
        .iter()
        .map(|(p, u)| PlatformIdentity::new(*p, *u))
        .collect();
    profile
}

/// Create a test profile with a specific total
pub fn test_profile_with_total(username: &str, total_solved: i64) -> UserProfile {
    let mut profile = test_profile_named(username);
    profile.total_solved = total_solved;
    profile
}

/// Create an upcoming test tournament
pub fn test_tournament(title: &str, host: &str) -> Tournament {
    let start = Utc::now() + Duration::days(1);
    Tournament {
        id: format!("{}-{}", host, title),
        title: title.to_string(),
        host_platform: host.to_string(),
        start_time: start,
        end_time: start + Duration::hours(2),
        duration_seconds: 7200,
        registration_url: format!("https://{}.test/contest", host.to_lowercase()),
        category: TournamentCategory::infer(title),
        participant_count: None,
        phase: ContestPhase::Before,
        description: String::new(),
    }
}
