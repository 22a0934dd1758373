//! Judge platform port traits
//!
//! Defines the interfaces for pulling user stats from coding judges and contest
//! listings from contest aggregators.

use async_trait::async_trait;

use crate::domain::entities::{FetchedStats, Platform, Tournament};
use crate::error::{ContestError, PlatformError};

/// Client for one judge platform
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Platform this adapter serves
    fn platform(&self) -> Platform;

    /// Fetch and normalize stats for an external username.
    ///
    /// Makes a single attempt; the caller decides whether to retry.
    async fn fetch_stats(&self, username: &str) -> Result<FetchedStats, PlatformError>;
}

/// Upstream contest listing
#[async_trait]
pub trait ContestSource: Send + Sync {
    /// Short name used in logs and configuration
    fn name(&self) -> &str;

    /// Fetch contests normalized to tournaments, in upstream order
    async fn fetch_contests(&self) -> Result<Vec<Tournament>, ContestError>;
}
