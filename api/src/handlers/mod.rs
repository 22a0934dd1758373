//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod leaderboard;
pub mod profiles;
pub mod tournaments;

pub use leaderboard::get_leaderboard;
pub use profiles::{
    create_profile, get_profile, get_profile_by_username, preview_platform_stats,
    remove_platform_username, set_platform_username, sync_stats,
};
pub use tournaments::list_tournaments;
