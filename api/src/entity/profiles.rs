use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub total_solved: i64,
    pub rank_placement: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::platform_identities::Entity")]
    PlatformIdentities,
    #[sea_orm(has_many = "super::platform_stats::Entity")]
    PlatformStats,
    #[sea_orm(has_many = "super::performance_history::Entity")]
    PerformanceHistory,
}

impl Related<super::platform_identities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlatformIdentities.def()
    }
}

impl Related<super::platform_stats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlatformStats.def()
    }
}

impl Related<super::performance_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
