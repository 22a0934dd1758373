//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//! Each method is atomic on its own; nothing spans a whole sync.

use async_trait::async_trait;

use crate::domain::entities::{
    NewProfile, PerformanceSample, Platform, PlatformIdentity, PlatformStats, ProfileSummary,
    UserId, UserProfile,
};
use crate::error::DomainError;

/// Repository for user profiles and the records hanging off them
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create a new profile
    async fn create(&self, profile: &NewProfile) -> Result<UserProfile, DomainError>;

    /// Find a profile by ID, with identities, stats and history
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Find a profile by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, DomainError>;

    /// List the platform identities configured for a profile
    async fn list_identities(&self, id: &UserId) -> Result<Vec<PlatformIdentity>, DomainError>;

    /// Insert or replace the identity for `(id, identity.platform)`
    async fn set_identity(
        &self,
        id: &UserId,
        identity: &PlatformIdentity,
    ) -> Result<(), DomainError>;

    /// Remove the identity and stats row for a platform; returns whether an
    /// identity existed
    async fn remove_identity(&self, id: &UserId, platform: Platform) -> Result<bool, DomainError>;

    /// Batch upsert stats keyed by `(id, platform)`, overwriting every field
    async fn upsert_stats(&self, id: &UserId, stats: &[PlatformStats]) -> Result<(), DomainError>;

    /// Set the cached total solved count
    async fn update_total_solved(&self, id: &UserId, total: i64) -> Result<(), DomainError>;

    /// Insert the sample for its date, replacing any sample already on that day
    async fn record_history(
        &self,
        id: &UserId,
        sample: &PerformanceSample,
    ) -> Result<(), DomainError>;

    /// All profiles ordered by total solved (desc), then username (asc)
    async fn list_standings(&self) -> Result<Vec<ProfileSummary>, DomainError>;

    /// Persist a leaderboard placement
    async fn update_rank_placement(&self, id: &UserId, placement: i32)
        -> Result<(), DomainError>;
}
