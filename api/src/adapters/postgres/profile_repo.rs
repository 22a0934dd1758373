//! PostgreSQL adapter for ProfileRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    NewProfile, PerformanceSample, Platform, PlatformIdentity, PlatformStats, ProfileSummary,
    UserId, UserProfile,
};
use crate::domain::ports::ProfileRepository;
use crate::entity::{performance_history, platform_identities, platform_stats, profiles};
use crate::error::DomainError;

/// PostgreSQL implementation of ProfileRepository
pub struct PostgresProfileRepository {
    db: DatabaseConnection,
}

impl PostgresProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach identities, stats and history to a profile row
    async fn load(&self, model: profiles::Model) -> Result<UserProfile, DomainError> {
        let identities = platform_identities::Entity::find()
            .filter(platform_identities::Column::UserId.eq(model.id))
            .order_by_asc(platform_identities::Column::Platform)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let stats = platform_stats::Entity::find()
            .filter(platform_stats::Column::UserId.eq(model.id))
            .order_by_asc(platform_stats::Column::Platform)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let history = performance_history::Entity::find()
            .filter(performance_history::Column::UserId.eq(model.id))
            .order_by_asc(performance_history::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(UserProfile {
            id: UserId(model.id),
            username: model.username,
            total_solved: model.total_solved,
            rank_placement: model.rank_placement,
            platforms: identities
                .into_iter()
                .filter_map(|m| PlatformIdentity::try_from(m).ok())
                .collect(),
            stats: stats
                .into_iter()
                .filter_map(|m| PlatformStats::try_from(m).ok())
                .collect(),
            history: history.into_iter().map(Into::into).collect(),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// A concurrent create can slip past the username check; the UNIQUE index
/// still rejects it and that is reported as a conflict.
fn username_taken(username: &str) -> impl FnOnce(DbErr) -> DomainError + '_ {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::AlreadyExists(format!("Username {} is taken", username))
        }
        _ => db_err(e),
    }
}

fn not_updated(id: &UserId) -> impl FnOnce(DbErr) -> DomainError + '_ {
    move |e| match e {
        DbErr::RecordNotUpdated => DomainError::NotFound(format!("Profile {} not found", id)),
        other => db_err(other),
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: &NewProfile) -> Result<UserProfile, DomainError> {
        if self.find_by_username(&profile.username).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!(
                "Username {} is taken",
                profile.username
            )));
        }

        let now = Utc::now().fixed_offset();
        let model = profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(profile.username.clone()),
            total_solved: Set(0),
            rank_placement: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(username_taken(&profile.username))?;
        self.load(result).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let result = profiles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match result {
            Some(model) => Ok(Some(self.load(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>, DomainError> {
        let result = profiles::Entity::find()
            .filter(profiles::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match result {
            Some(model) => Ok(Some(self.load(model).await?)),
            None => Ok(None),
        }
    }

    async fn list_identities(&self, id: &UserId) -> Result<Vec<PlatformIdentity>, DomainError> {
        let results = platform_identities::Entity::find()
            .filter(platform_identities::Column::UserId.eq(id.0))
            .order_by_asc(platform_identities::Column::Platform)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results
            .into_iter()
            .filter_map(|m| PlatformIdentity::try_from(m).ok())
            .collect())
    }

    async fn set_identity(
        &self,
        id: &UserId,
        identity: &PlatformIdentity,
    ) -> Result<(), DomainError> {
        let model = platform_identities::ActiveModel {
            user_id: Set(id.0),
            platform: Set(identity.platform.to_string()),
            external_username: Set(identity.external_username.clone()),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        platform_identities::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    platform_identities::Column::UserId,
                    platform_identities::Column::Platform,
                ])
                .update_columns([
                    platform_identities::Column::ExternalUsername,
                    platform_identities::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn remove_identity(&self, id: &UserId, platform: Platform) -> Result<bool, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = platform_identities::Entity::delete_many()
            .filter(platform_identities::Column::UserId.eq(id.0))
            .filter(platform_identities::Column::Platform.eq(platform.to_string()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        platform_stats::Entity::delete_many()
            .filter(platform_stats::Column::UserId.eq(id.0))
            .filter(platform_stats::Column::Platform.eq(platform.to_string()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn upsert_stats(&self, id: &UserId, stats: &[PlatformStats]) -> Result<(), DomainError> {
        if stats.is_empty() {
            return Ok(());
        }

        let models = stats.iter().map(|s| platform_stats::ActiveModel {
            user_id: Set(id.0),
            platform: Set(s.platform.to_string()),
            solved_count: Set(s.solved_count),
            rank: Set(s.rank),
            rank_title: Set(s.rank_title.clone()),
            rating: Set(s.rating),
            contests_participated: Set(s.contests_participated),
            last_synced_at: Set(s.last_synced_at.fixed_offset()),
        });

        platform_stats::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    platform_stats::Column::UserId,
                    platform_stats::Column::Platform,
                ])
                .update_columns([
                    platform_stats::Column::SolvedCount,
                    platform_stats::Column::Rank,
                    platform_stats::Column::RankTitle,
                    platform_stats::Column::Rating,
                    platform_stats::Column::ContestsParticipated,
                    platform_stats::Column::LastSyncedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn update_total_solved(&self, id: &UserId, total: i64) -> Result<(), DomainError> {
        profiles::ActiveModel {
            id: Set(id.0),
            total_solved: Set(total),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(not_updated(id))?;

        Ok(())
    }

    async fn record_history(
        &self,
        id: &UserId,
        sample: &PerformanceSample,
    ) -> Result<(), DomainError> {
        let model = performance_history::ActiveModel {
            user_id: Set(id.0),
            date: Set(sample.date),
            solved_count: Set(sample.solved_count),
            recorded_at: Set(Utc::now().fixed_offset()),
        };

        performance_history::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    performance_history::Column::UserId,
                    performance_history::Column::Date,
                ])
                .update_columns([
                    performance_history::Column::SolvedCount,
                    performance_history::Column::RecordedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn list_standings(&self) -> Result<Vec<ProfileSummary>, DomainError> {
        let results = profiles::Entity::find()
            .order_by_desc(profiles::Column::TotalSolved)
            .order_by_asc(profiles::Column::Username)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn update_rank_placement(
        &self,
        id: &UserId,
        placement: i32,
    ) -> Result<(), DomainError> {
        profiles::ActiveModel {
            id: Set(id.0),
            rank_placement: Set(Some(placement)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(not_updated(id))?;

        Ok(())
    }
}

/// Convert SeaORM models to domain entities
impl From<profiles::Model> for ProfileSummary {
    fn from(model: profiles::Model) -> Self {
        ProfileSummary {
            id: UserId(model.id),
            username: model.username,
            total_solved: model.total_solved,
            rank_placement: model.rank_placement,
        }
    }
}

impl TryFrom<platform_identities::Model> for PlatformIdentity {
    type Error = String;

    fn try_from(model: platform_identities::Model) -> Result<Self, Self::Error> {
        Ok(PlatformIdentity {
            platform: model.platform.parse()?,
            external_username: model.external_username,
        })
    }
}

impl TryFrom<platform_stats::Model> for PlatformStats {
    type Error = String;

    fn try_from(model: platform_stats::Model) -> Result<Self, Self::Error> {
        Ok(PlatformStats {
            platform: model.platform.parse()?,
            solved_count: model.solved_count,
            rank: model.rank,
            rank_title: model.rank_title,
            rating: model.rating,
            contests_participated: model.contests_participated,
            last_synced_at: model.last_synced_at.with_timezone(&Utc),
        })
    }
}

impl From<performance_history::Model> for PerformanceSample {
    fn from(model: performance_history::Model) -> Self {
        PerformanceSample {
            date: model.date,
            solved_count: model.solved_count,
        }
    }
}
