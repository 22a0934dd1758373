//! Contest service
//!
//! Aggregates contest listings from the configured sources into one tournament
//! list. Listing never fails: if any source errors, or nothing comes back, the
//! caller gets a small placeholder list instead.

use std::sync::Arc;

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::adapters::{CodeforcesContestSource, KontestsContestSource};
use crate::config::{Config, ContestSourceKind};
use crate::domain::entities::{
    host_platforms, ContestPhase, Tournament, TournamentCategory, TournamentFilter,
};
use crate::domain::ports::ContestSource;

/// Filtered tournaments plus the host platforms available for filtering
#[derive(Debug, Clone, Serialize)]
pub struct TournamentListing {
    pub tournaments: Vec<Tournament>,
    pub platforms: Vec<String>,
}

pub struct ContestService {
    sources: Vec<Arc<dyn ContestSource>>,
}

impl ContestService {
    pub fn new(sources: Vec<Arc<dyn ContestSource>>) -> Self {
        Self { sources }
    }

    /// Build the sources named in the configuration, in configured order
    pub fn from_config(http: Client, config: &Config) -> Self {
        let sources = config
            .contest_sources
            .iter()
            .map(|kind| -> Arc<dyn ContestSource> {
                match kind {
                    ContestSourceKind::Codeforces => Arc::new(CodeforcesContestSource::new(
                        http.clone(),
                        config.codeforces_url.clone(),
                        config.contest_limit,
                    )),
                    ContestSourceKind::Kontests => Arc::new(KontestsContestSource::new(
                        http.clone(),
                        config.kontests_url.clone(),
                        config.contest_limit,
                    )),
                }
            })
            .collect();
        Self::new(sources)
    }

    /// Fetch from every source in order and concatenate.
    ///
    /// Any failure, or an empty result, yields `placeholder_tournaments()`.
    pub async fn fetch_all_contests(&self) -> Vec<Tournament> {
        let mut tournaments = Vec::new();

        for source in &self.sources {
            match source.fetch_contests().await {
                Ok(mut batch) => {
                    tracing::debug!(source = source.name(), count = batch.len(), "Fetched contests");
                    tournaments.append(&mut batch);
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        error = %e,
                        "Contest source failed, serving placeholder tournaments"
                    );
                    return placeholder_tournaments();
                }
            }
        }

        if tournaments.is_empty() {
            tracing::warn!("No contests returned, serving placeholder tournaments");
            return placeholder_tournaments();
        }

        tournaments
    }

    /// Fetch, then filter
    pub async fn list(&self, filter: &TournamentFilter) -> TournamentListing {
        let all = self.fetch_all_contests().await;
        TournamentListing {
            platforms: host_platforms(&all),
            tournaments: filter.apply(&all, Utc::now()),
        }
    }
}

/// Static fallback listing: two upcoming competitions, one and two days out
pub fn placeholder_tournaments() -> Vec<Tournament> {
    let now = Utc::now();
    let entry = |id: &str, title: &str, days: i64, hours: i64, participants: u64| {
        let start = now + Duration::days(days);
        Tournament {
            id: id.to_string(),
            title: title.to_string(),
            host_platform: "Codeforces".to_string(),
            start_time: start,
            end_time: start + Duration::hours(hours),
            duration_seconds: hours * 3600,
            registration_url: "https://codeforces.com/contests".to_string(),
            category: TournamentCategory::Competition,
            participant_count: Some(participants),
            phase: ContestPhase::Before,
            description: "Codeforces competitive programming contest".to_string(),
        }
    };

    vec![
        entry("placeholder-1", "Codeforces Round (Div. 2)", 1, 2, 15000),
        entry("placeholder-2", "Educational Codeforces Round", 2, 2, 12000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    use crate::domain::entities::StatusBucket;
    use crate::test_utils::{spawn_stub, test_tournament, MockContestSource};

    fn service(sources: Vec<MockContestSource>) -> ContestService {
        ContestService::new(
            sources
                .into_iter()
                .map(|s| Arc::new(s) as Arc<dyn ContestSource>)
                .collect(),
        )
    }

    fn assert_placeholder(tournaments: &[Tournament]) {
        assert_eq!(tournaments.len(), 2);
        let now = Utc::now();
        for t in tournaments {
            assert_eq!(t.category, TournamentCategory::Competition);
            assert_eq!(t.phase, ContestPhase::Before);
            assert!(t.start_time > now);
        }
    }

    #[tokio::test]
    async fn concatenates_sources_in_order() {
        let service = service(vec![
            MockContestSource::returning(
                "a",
                vec![test_tournament("A1", "Codeforces"), test_tournament("A2", "Codeforces")],
            ),
            MockContestSource::returning("b", vec![test_tournament("B1", "AtCoder")]),
        ]);

        let titles: Vec<_> = service
            .fetch_all_contests()
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["A1", "A2", "B1"]);
    }

    #[tokio::test]
    async fn any_failure_falls_back_to_placeholder() {
        let service = service(vec![
            MockContestSource::returning("a", vec![test_tournament("A1", "Codeforces")]),
            MockContestSource::failing("b", 503),
        ]);

        assert_placeholder(&service.fetch_all_contests().await);
    }

    #[tokio::test]
    async fn empty_result_falls_back_to_placeholder() {
        let empty_source = service(vec![MockContestSource::returning("a", vec![])]);
        assert_placeholder(&empty_source.fetch_all_contests().await);

        let no_sources = service(vec![]);
        assert_placeholder(&no_sources.fetch_all_contests().await);
    }

    #[tokio::test]
    async fn upstream_timeout_falls_back_to_placeholder() {
        let router = Router::new().route(
            "/api/contest.list",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!({ "status": "OK", "result": [] }))
            }),
        );
        let http = Client::builder()
            .timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap();
        let source: Arc<dyn ContestSource> = Arc::new(CodeforcesContestSource::new(
            http,
            spawn_stub(router).await,
            10,
        ));
        let service = ContestService::new(vec![source]);

        assert_placeholder(&service.fetch_all_contests().await);
    }

    #[tokio::test]
    async fn out_of_range_upstream_values_still_list() {
        let router = Router::new().route(
            "/api/contest.list",
            get(|| async {
                Json(json!({
                    "status": "OK",
                    "result": [
                        { "id": 1, "name": "Broken Round", "phase": "BEFORE", "durationSeconds": 9223372036854775807i64, "startTimeSeconds": 1702996500 }
                    ]
                }))
            }),
        );
        let source: Arc<dyn ContestSource> = Arc::new(CodeforcesContestSource::new(
            Client::new(),
            spawn_stub(router).await,
            10,
        ));
        let service = ContestService::new(vec![source]);

        assert_placeholder(&service.list(&TournamentFilter::default()).await.tournaments);
    }

    #[tokio::test]
    async fn list_filters_and_reports_platforms() {
        let service = service(vec![MockContestSource::returning(
            "a",
            vec![
                test_tournament("Round 1", "Codeforces"),
                test_tournament("Spring Hackathon", "Devpost"),
                test_tournament("Beginner Contest", "AtCoder"),
            ],
        )]);

        let listing = service
            .list(&TournamentFilter {
                category: Some(TournamentCategory::Hackathon),
                ..Default::default()
            })
            .await;
        assert_eq!(listing.platforms, vec!["Codeforces", "Devpost", "AtCoder"]);
        assert_eq!(listing.tournaments.len(), 1);
        assert_eq!(listing.tournaments[0].title, "Spring Hackathon");

        let listing = service
            .list(&TournamentFilter {
                status: Some(StatusBucket::Ongoing),
                ..Default::default()
            })
            .await;
        assert!(listing.tournaments.is_empty());
    }

    #[test]
    fn from_config_builds_sources_in_order() {
        let mut config = Config::for_tests();
        config.contest_sources = vec![ContestSourceKind::Kontests, ContestSourceKind::Codeforces];

        let service = ContestService::from_config(Client::new(), &config);
        let names: Vec<_> = service.sources.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["kontests", "codeforces"]);
    }
}
