//! Stats service
//!
//! Owns profile setup and the per-user stats sync: every configured platform is
//! queried in turn, failures are skipped, and the successes are committed as one
//! stats batch, a new total and a history sample for today.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

use crate::app::PlatformRegistry;
use crate::domain::entities::{
    FetchedStats, NewProfile, PerformanceSample, Platform, PlatformIdentity, PlatformStats, UserId,
    UserProfile,
};
use crate::domain::ports::ProfileRepository;
use crate::error::{AppError, DomainError};

/// A platform that could not be synced
#[derive(Debug, Clone, Serialize)]
pub struct SyncFailure {
    pub platform: Platform,
    pub reason: String,
}

/// Outcome of one sync
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub user_id: UserId,
    pub total_solved: i64,
    pub synced: Vec<PlatformStats>,
    pub failed: Vec<SyncFailure>,
    pub synced_at: DateTime<Utc>,
}

/// Service for profiles and stats aggregation
pub struct StatsService<PR>
where
    PR: ProfileRepository,
{
    profiles: Arc<PR>,
    registry: Arc<PlatformRegistry>,
}

impl<PR> StatsService<PR>
where
    PR: ProfileRepository,
{
    pub fn new(profiles: Arc<PR>, registry: Arc<PlatformRegistry>) -> Self {
        Self { profiles, registry }
    }

    /// Create a profile with a unique username
    pub async fn create_profile(&self, username: &str) -> Result<UserProfile, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("username must not be empty".to_string()).into());
        }

        let profile = self
            .profiles
            .create(&NewProfile {
                username: username.to_string(),
            })
            .await?;

        tracing::info!(user_id = %profile.id, username = %profile.username, "Created profile");
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, AppError> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile {} not found", user_id)).into())
    }

    pub async fn get_profile_by_username(&self, username: &str) -> Result<UserProfile, AppError> {
        self.profiles
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User {} not found", username)).into())
    }

    /// Link (or relink) a platform account to a profile
    pub async fn set_platform_username(
        &self,
        user_id: &UserId,
        platform: Platform,
        username: &str,
    ) -> Result<PlatformIdentity, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation(format!(
                "{} username must not be empty",
                platform.display_name()
            ))
            .into());
        }

        self.get_profile(user_id).await?;

        let identity = PlatformIdentity::new(platform, username);
        self.profiles.set_identity(user_id, &identity).await?;

        tracing::debug!(user_id = %user_id, platform = %platform, "Updated platform username");
        Ok(identity)
    }

    /// Unlink a platform account; existing stats rows are left in place
    pub async fn remove_platform_username(
        &self,
        user_id: &UserId,
        platform: Platform,
    ) -> Result<(), AppError> {
        self.get_profile(user_id).await?;

        if !self.profiles.remove_identity(user_id, platform).await? {
            return Err(AppError::NotFound(format!(
                "No {} username configured",
                platform.display_name()
            )));
        }
        Ok(())
    }

    /// Look up one judge account without touching any profile
    pub async fn preview_stats(
        &self,
        platform: Platform,
        username: &str,
    ) -> Result<FetchedStats, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::BadRequest("username must not be empty".to_string()));
        }

        let adapter = self.registry.get(platform).ok_or_else(|| {
            let available: Vec<String> =
                self.registry.platforms().iter().map(|p| p.to_string()).collect();
            AppError::BadRequest(format!(
                "{} is not supported (available: {})",
                platform.display_name(),
                available.join(", ")
            ))
        })?;

        Ok(adapter.fetch_stats(username).await?)
    }

    /// Pull stats from every configured platform and commit the successes.
    ///
    /// Adapter failures are logged and skipped. The new total counts only the
    /// platforms that succeeded in this sync; stats rows of failed platforms
    /// keep their previous values and timestamps.
    pub async fn sync_stats(&self, user_id: &UserId) -> Result<SyncReport, AppError> {
        self.get_profile(user_id).await?;

        let identities = self.profiles.list_identities(user_id).await?;
        // Postgres keeps microseconds; truncate so reads match what was written
        let synced_at = Utc::now().trunc_subsecs(6);

        let mut staged: Vec<PlatformStats> = Vec::new();
        let mut failed = Vec::new();
        let mut total_solved = 0i64;

        for identity in identities.into_iter().filter(PlatformIdentity::is_configured) {
            let platform = identity.platform;
            let Some(adapter) = self.registry.get(platform) else {
                tracing::warn!(user_id = %user_id, platform = %platform, "No adapter registered, skipping");
                failed.push(SyncFailure {
                    platform,
                    reason: "platform not supported".to_string(),
                });
                continue;
            };

            match adapter.fetch_stats(identity.external_username.trim()).await {
                Ok(fetched) => {
                    total_solved += fetched.solved_count;
                    staged.push(fetched.into_stats(platform, synced_at));
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = %user_id,
                        platform = %platform,
                        error = %e,
                        not_found = e.is_not_found(),
                        "Skipping platform during sync"
                    );
                    failed.push(SyncFailure {
                        platform,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !staged.is_empty() {
            self.profiles.upsert_stats(user_id, &staged).await?;
        }

        self.profiles
            .update_total_solved(user_id, total_solved)
            .await?;

        self.profiles
            .record_history(
                user_id,
                &PerformanceSample {
                    date: synced_at.date_naive(),
                    solved_count: total_solved,
                },
            )
            .await?;

        tracing::info!(
            user_id = %user_id,
            total_solved,
            synced = staged.len(),
            failed = failed.len(),
            "Synced platform stats"
        );

        Ok(SyncReport {
            user_id: *user_id,
            total_solved,
            synced: staged,
            failed,
            synced_at,
        })
    }
}
