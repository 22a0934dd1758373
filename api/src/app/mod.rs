//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod contest_service;
pub mod leaderboard_service;
pub mod platform_registry;
pub mod stats_service;

pub use contest_service::{ContestService, TournamentListing};
pub use leaderboard_service::{LeaderboardEntry, LeaderboardService};
pub use platform_registry::PlatformRegistry;
pub use stats_service::{StatsService, SyncReport};
