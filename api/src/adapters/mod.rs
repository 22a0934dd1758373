//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod contests;
pub mod judges;
pub mod postgres;

pub use contests::{CodeforcesContestSource, KontestsContestSource};
pub use judges::{CodeforcesAdapter, HackerRankAdapter, LeetCodeAdapter};
pub use postgres::PostgresProfileRepository;
