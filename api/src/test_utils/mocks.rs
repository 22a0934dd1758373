//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    FetchedStats, NewProfile, PerformanceSample, Platform, PlatformIdentity, PlatformStats,
    ProfileSummary, Tournament, UserId, UserProfile,
};
use crate::domain::ports::{ContestSource, PlatformAdapter, ProfileRepository};
use crate::error::{ContestError, DomainError, PlatformError};

// ============================================================================
// In-Memory Profile Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    upsert_calls: Arc<RwLock<usize>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a profile for testing
    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.profiles.write().unwrap().insert(profile.id, profile);
        self
    }

    /// Number of `upsert_stats` batches written
    pub fn upsert_calls(&self) -> usize {
        *self.upsert_calls.read().unwrap()
    }

    fn with_profile_mut<T>(
        &self,
        id: &UserId,
        f: impl FnOnce(&mut UserProfile) -> T,
    ) -> Result<T, DomainError> {
        let mut profiles = self.profiles.write().unwrap();
        profiles
            .get_mut(id)
            .map(f)
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", id)))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, new_profile: &NewProfile) -> Result<UserProfile, DomainError> {
        let mut profiles = self.profiles.write().unwrap();
        if profiles.values().any(|p| p.username == new_profile.username) {
            return Err(DomainError::AlreadyExists(format!(
                "Username {} is taken",
                new_profile.username
            )));
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: UserId::new(),
            username: new_profile.username.clone(),
            total_solved: 0,
            rank_placement: None,
            platforms: vec![],
            stats: vec![],
            history: vec![],
            created_at: now,
            updated_at: now,
        };
        profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.read().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .profiles
            .read()
            .unwrap()
            .values()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn list_identities(&self, id: &UserId) -> Result<Vec<PlatformIdentity>, DomainError> {
        Ok(self
            .profiles
            .read()
            .unwrap()
            .get(id)
            .map(|p| p.platforms.clone())
            .unwrap_or_default())
    }

    async fn set_identity(
        &self,
        id: &UserId,
        identity: &PlatformIdentity,
    ) -> Result<(), DomainError> {
        self.with_profile_mut(id, |p| {
            p.platforms.retain(|i| i.platform != identity.platform);
            p.platforms.push(identity.clone());
            p.platforms.sort_by_key(|i| i.platform);
        })
    }

    async fn remove_identity(&self, id: &UserId, platform: Platform) -> Result<bool, DomainError> {
        let mut profiles = self.profiles.write().unwrap();
        let Some(profile) = profiles.get_mut(id) else {
            return Ok(false);
        };
        let before = profile.platforms.len();
        profile.platforms.retain(|i| i.platform != platform);
        profile.stats.retain(|s| s.platform != platform);
        Ok(profile.platforms.len() != before)
    }

    async fn upsert_stats(&self, id: &UserId, stats: &[PlatformStats]) -> Result<(), DomainError> {
        *self.upsert_calls.write().unwrap() += 1;
        self.with_profile_mut(id, |p| {
            for s in stats {
                p.stats.retain(|existing| existing.platform != s.platform);
                p.stats.push(s.clone());
            }
            p.stats.sort_by_key(|s| s.platform);
        })
    }

    async fn update_total_solved(&self, id: &UserId, total: i64) -> Result<(), DomainError> {
        self.with_profile_mut(id, |p| {
            p.total_solved = total;
            p.updated_at = Utc::now();
        })
    }

    async fn record_history(
        &self,
        id: &UserId,
        sample: &PerformanceSample,
    ) -> Result<(), DomainError> {
        self.with_profile_mut(id, |p| {
            let mut by_date: BTreeMap<_, _> =
                p.history.iter().map(|s| (s.date, s.solved_count)).collect();
            by_date.insert(sample.date, sample.solved_count);
            p.history = by_date
                .into_iter()
                .map(|(date, solved_count)| PerformanceSample { date, solved_count })
                .collect();
        })
    }

    async fn list_standings(&self) -> Result<Vec<ProfileSummary>, DomainError> {
        let mut standings: Vec<ProfileSummary> = self
            .profiles
            .read()
            .unwrap()
            .values()
            .map(|p| ProfileSummary {
                id: p.id,
                username: p.username.clone(),
                total_solved: p.total_solved,
                rank_placement: p.rank_placement,
            })
            .collect();
        standings.sort_by(|a, b| {
            b.total_solved
                .cmp(&a.total_solved)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(standings)
    }

    async fn update_rank_placement(
        &self,
        id: &UserId,
        placement: i32,
    ) -> Result<(), DomainError> {
        self.with_profile_mut(id, |p| p.rank_placement = Some(placement))
    }
}

// ============================================================================
// Failing Profile Repository
// ============================================================================

/// Profile store whose writes always fail; reads delegate to an inner store
pub struct FailingWritesRepository {
    inner: InMemoryProfileRepository,
}

impl FailingWritesRepository {
    pub fn new(inner: InMemoryProfileRepository) -> Self {
        Self { inner }
    }

    fn fail() -> DomainError {
        DomainError::Database("connection reset".to_string())
    }
}

#[async_trait]
impl ProfileRepository for FailingWritesRepository {
    async fn create(&self, _profile: &NewProfile) -> Result<UserProfile, DomainError> {
        Err(Self::fail())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, DomainError> {
        self.inner.find_by_username(username).await
    }

    async fn list_identities(&self, id: &UserId) -> Result<Vec<PlatformIdentity>, DomainError> {
        self.inner.list_identities(id).await
    }

    async fn set_identity(&self, _: &UserId, _: &PlatformIdentity) -> Result<(), DomainError> {
        Err(Self::fail())
    }

    async fn remove_identity(&self, _: &UserId, _: Platform) -> Result<bool, DomainError> {
        Err(Self::fail())
    }

    async fn upsert_stats(&self, _: &UserId, _: &[PlatformStats]) -> Result<(), DomainError> {
        Err(Self::fail())
    }

    async fn update_total_solved(&self, _: &UserId, _: i64) -> Result<(), DomainError> {
        Err(Self::fail())
    }

    async fn record_history(&self, _: &UserId, _: &PerformanceSample) -> Result<(), DomainError> {
        Err(Self::fail())
    }

    async fn list_standings(&self) -> Result<Vec<ProfileSummary>, DomainError> {
        self.inner.list_standings().await
    }

    async fn update_rank_placement(&self, _: &UserId, _: i32) -> Result<(), DomainError> {
        Err(Self::fail())
    }
}

// ============================================================================
// Mock Platform Adapter
// ============================================================================

/// Scripted outcome for one username
#[derive(Clone)]
pub enum MockOutcome {
    Stats(FetchedStats),
    NotFound,
    Upstream(String),
}

/// Platform adapter that answers from a script and records the usernames asked
pub struct MockPlatformAdapter {
    platform: Platform,
    outcomes: HashMap<String, MockOutcome>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockPlatformAdapter {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            outcomes: HashMap::new(),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_solved(self, username: &str, solved_count: i64) -> Self {
        self.with_outcome(username, MockOutcome::Stats(FetchedStats::solved(solved_count)))
    }

    pub fn with_outcome(mut self, username: &str, outcome: MockOutcome) -> Self {
        self.outcomes.insert(username.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PlatformAdapter for MockPlatformAdapter {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_stats(&self, username: &str) -> Result<FetchedStats, PlatformError> {
        self.calls.write().unwrap().push(username.to_string());
        match self.outcomes.get(username) {
            Some(MockOutcome::Stats(stats)) => Ok(stats.clone()),
            Some(MockOutcome::Upstream(msg)) => Err(PlatformError::upstream(self.platform, msg)),
            Some(MockOutcome::NotFound) | None => {
                Err(PlatformError::not_found(self.platform, username))
            }
        }
    }
}

// ============================================================================
// Mock Contest Source
// ============================================================================

/// Contest source returning a fixed list, or failing
pub struct MockContestSource {
    name: String,
    result: Result<Vec<Tournament>, u16>,
}

impl MockContestSource {
    pub fn returning(name: &str, tournaments: Vec<Tournament>) -> Self {
        Self {
            name: name.to_string(),
            result: Ok(tournaments),
        }
    }

    pub fn failing(name: &str, status: u16) -> Self {
        Self {
            name: name.to_string(),
            result: Err(status),
        }
    }
}

#[async_trait]
impl ContestSource for MockContestSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_contests(&self) -> Result<Vec<Tournament>, ContestError> {
        match &self.result {
            Ok(tournaments) => Ok(tournaments.clone()),
            Err(status) => Err(ContestError::Api {
                status: *status,
                message: "mock failure".to_string(),
            }),
        }
    }
}
