//! SeaORM entities
//!
//! Table models for the PostgreSQL profile store. Mirrors `migrations/0001_init.sql`.

pub mod performance_history;
pub mod platform_identities;
pub mod platform_stats;
pub mod profiles;
