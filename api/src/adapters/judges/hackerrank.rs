//! HackerRank adapter
//!
//! Reads the recent-challenges REST listing; its `total` is the solved count.
//! HackerRank exposes no rank or rating here.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use urlencoding::encode;

use crate::domain::entities::{FetchedStats, Platform};
use crate::domain::ports::PlatformAdapter;
use crate::error::PlatformError;

/// HackerRank REST client
pub struct HackerRankAdapter {
    http: Client,
    base_url: String,
}

impl HackerRankAdapter {
    pub fn new(http: Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RecentChallenges {
    total: Option<i64>,
}

#[async_trait]
impl PlatformAdapter for HackerRankAdapter {
    fn platform(&self) -> Platform {
        Platform::Hackerrank
    }

    async fn fetch_stats(&self, username: &str) -> Result<FetchedStats, PlatformError> {
        let platform = self.platform();
        let url = format!(
            "{}/rest/hackers/{}/recent_challenges",
            self.base_url,
            encode(username)
        );

        let response = self
            .http
            .get(url)
            .query(&[("limit", "100")])
            .send()
            .await
            .map_err(|e| PlatformError::upstream(platform, e))?;

        let listing: RecentChallenges = super::read_json(platform, username, response).await?;
        let total = listing
            .total
            .ok_or_else(|| PlatformError::not_found(platform, username))?;

        Ok(FetchedStats::solved(total))
    }
}
