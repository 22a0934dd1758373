//! Codeforces contest listing
//!
//! Keeps contests that have not finished yet (`BEFORE` or `CODING`) and takes a
//! fixed-size prefix of them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::{ContestPhase, Tournament, TournamentCategory};
use crate::domain::ports::ContestSource;
use crate::error::ContestError;

/// Contest source backed by `contest.list`
pub struct CodeforcesContestSource {
    http: Client,
    base_url: String,
    limit: usize,
}

impl CodeforcesContestSource {
    pub fn new(http: Client, base_url: String, limit: usize) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        }
    }
}

#[derive(Deserialize)]
struct ContestList {
    status: String,
    comment: Option<String>,
    #[serde(default)]
    result: Vec<CfContest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfContest {
    id: i64,
    name: String,
    phase: String,
    duration_seconds: i64,
    start_time_seconds: Option<i64>,
}

impl CfContest {
    fn into_tournament(self) -> Option<Tournament> {
        let start = DateTime::<Utc>::from_timestamp(self.start_time_seconds?, 0)?;
        let Some(end) = Duration::try_seconds(self.duration_seconds)
            .and_then(|d| start.checked_add_signed(d))
        else {
            tracing::debug!(contest = %self.name, "Skipping contest with out-of-range duration");
            return None;
        };

        Some(Tournament {
            id: self.id.to_string(),
            category: TournamentCategory::infer(&self.name),
            title: self.name,
            host_platform: "Codeforces".to_string(),
            start_time: start,
            end_time: end,
            duration_seconds: self.duration_seconds,
            registration_url: format!("https://codeforces.com/contest/{}", self.id),
            participant_count: None,
            phase: ContestPhase::parse(&self.phase),
            description: "Codeforces competitive programming contest".to_string(),
        })
    }
}

#[async_trait]
impl ContestSource for CodeforcesContestSource {
    fn name(&self) -> &str {
        "codeforces"
    }

    async fn fetch_contests(&self) -> Result<Vec<Tournament>, ContestError> {
        let response = self
            .http
            .get(format!("{}/api/contest.list", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let list: ContestList = response
            .json()
            .await
            .map_err(|e| ContestError::Deserialization(e.to_string()))?;

        if list.status != "OK" {
            return Err(ContestError::Api {
                status: status.as_u16(),
                message: list.comment.unwrap_or_else(|| list.status.clone()),
            });
        }

        Ok(list
            .result
            .into_iter()
            .filter(|c| matches!(c.phase.as_str(), "BEFORE" | "CODING"))
            .take(self.limit)
            .filter_map(CfContest::into_tournament)
            .collect())
    }
}
