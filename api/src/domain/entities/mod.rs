//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod platform;
pub mod profile;
pub mod tournament;

pub use platform::{FetchedStats, Platform, PlatformIdentity, PlatformStats};
pub use profile::{NewProfile, PerformanceSample, ProfileSummary, UserId, UserProfile};
pub use tournament::{
    host_platforms, ContestPhase, DurationBucket, StatusBucket, Tournament, TournamentCategory,
    TournamentFilter,
};
