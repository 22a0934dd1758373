//! Kontests-style multi-site contest listing
//!
//! The upstream returns a flat JSON array across many judges. Times come either
//! as RFC 3339 or as `YYYY-MM-DD HH:MM:SS UTC`; durations as strings or numbers.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::{ContestPhase, Tournament, TournamentCategory};
use crate::domain::ports::ContestSource;
use crate::error::ContestError;

/// Contest source backed by `/api/v1/all`
pub struct KontestsContestSource {
    http: Client,
    base_url: String,
    limit: usize,
}

impl KontestsContestSource {
    pub fn new(http: Client, base_url: String, limit: usize) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Number(f64),
    Text(String),
}

impl Seconds {
    fn as_seconds(&self) -> Option<i64> {
        match self {
            Seconds::Number(n) => Some(*n as i64),
            Seconds::Text(s) => s.trim().parse::<f64>().ok().map(|n| n as i64),
        }
    }
}

#[derive(Deserialize)]
struct KontestEntry {
    name: String,
    url: String,
    start_time: String,
    end_time: String,
    duration: Option<Seconds>,
    site: String,
    status: Option<String>,
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S UTC")
                .ok()
                .map(|t| t.and_utc())
        })
}

impl KontestEntry {
    fn into_tournament(self) -> Option<Tournament> {
        let (Some(start), Some(end)) = (parse_time(&self.start_time), parse_time(&self.end_time))
        else {
            tracing::debug!(contest = %self.name, "Skipping contest with unparseable times");
            return None;
        };

        let duration_seconds = self
            .duration
            .as_ref()
            .and_then(Seconds::as_seconds)
            .unwrap_or_else(|| (end - start).num_seconds());

        Some(Tournament {
            id: format!("{}@{}", self.name, self.start_time),
            category: TournamentCategory::infer(&self.name),
            description: format!("{} hosted by {}", self.name, self.site),
            title: self.name,
            host_platform: self.site,
            start_time: start,
            end_time: end,
            duration_seconds,
            registration_url: self.url,
            participant_count: None,
            phase: self
                .status
                .as_deref()
                .map(ContestPhase::parse)
                .unwrap_or(ContestPhase::Unknown),
        })
    }
}

#[async_trait]
impl ContestSource for KontestsContestSource {
    fn name(&self) -> &str {
        "kontests"
    }

    async fn fetch_contests(&self) -> Result<Vec<Tournament>, ContestError> {
        let response = self
            .http
            .get(format!("{}/api/v1/all", self.base_url))
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

        let entries: Vec<KontestEntry> = response
            .json()
            .await
            .map_err(|e| ContestError::Deserialization(e.to_string()))?;

        Ok(entries
            .into_iter()
            .take(self.limit)
            .filter_map(KontestEntry::into_tournament)
            .collect())
    }
}
