//! Codeforces adapter
//!
//! Codeforces wraps every response in `{ status, comment?, result? }` and answers
//! an unknown handle with HTTP 400 and a `FAILED` status.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

use crate::domain::entities::{FetchedStats, Platform};
use crate::domain::ports::PlatformAdapter;
use crate::error::PlatformError;

/// Codeforces REST API client
pub struct CodeforcesAdapter {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Deserialize)]
struct CfUser {
    rating: Option<i64>,
    rank: Option<String>,
}

#[derive(Deserialize)]
struct Submission {
    problem: Problem,
    verdict: Option<String>,
}

#[derive(Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct Problem {
    contest_id: Option<i64>,
    #[serde(default)]
    index: String,
    #[serde(default)]
    name: String,
}

impl CodeforcesAdapter {
    pub fn new(http: Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
        username: &str,
    ) -> Result<Option<T>, PlatformError> {
        let platform = Platform::Codeforces;

        let response = self
            .http
            .get(format!("{}/api/{}", self.base_url, method))
            .query(query)
            .send()
            .await
            .map_err(|e| PlatformError::upstream(platform, e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(PlatformError::not_found(platform, username));
        }
        if !status.is_success() && status.as_u16() != 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::upstream(
                platform,
                format!("{} - {}", status.as_u16(), message),
            ));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| PlatformError::upstream(platform, format!("invalid body: {}", e)))?;

        if envelope.status == "OK" {
            return Ok(envelope.result);
        }

        let comment = envelope.comment.unwrap_or_default();
        if comment.to_lowercase().contains("not found") {
            Err(PlatformError::not_found(platform, username))
        } else {
            Err(PlatformError::upstream(
                platform,
                format!("{} failed: {}", method, comment),
            ))
        }
    }
}

/// Distinct problems with at least one accepted submission
fn count_solved(submissions: Vec<Submission>) -> i64 {
    submissions
        .into_iter()
        .filter(|s| s.verdict.as_deref() == Some("OK"))
        .map(|s| s.problem)
        .collect::<HashSet<_>>()
        .len() as i64
}

#[async_trait]
impl PlatformAdapter for CodeforcesAdapter {
    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    async fn fetch_stats(&self, username: &str) -> Result<FetchedStats, PlatformError> {
        let user = self
            .call::<Vec<CfUser>>("user.info", &[("handles", username)], username)
            .await?
            .and_then(|users| users.into_iter().next())
            .ok_or_else(|| PlatformError::not_found(self.platform(), username))?;

        let submissions = self
            .call::<Vec<Submission>>("user.status", &[("handle", username)], username)
            .await?
            .unwrap_or_default();

        // Optional field: a throttled third call must not fail the platform
        let contests = match self
            .call::<Vec<IgnoredAny>>("user.rating", &[("handle", username)], username)
            .await
        {
            Ok(changes) => changes.map(|changes| changes.len() as i64),
            Err(e) => {
                tracing::debug!(handle = %username, error = %e, "Skipping contest count");
                None
            }
        };

        Ok(FetchedStats {
            solved_count: count_solved(submissions),
            rank: None,
            rank_title: user.rank,
            rating: user.rating.map(|r| r as f64),
            contests_participated: contests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    use crate::test_utils::spawn_stub;

    fn unknown(handle: &str) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": "FAILED",
                "comment": format!("handles: User with handle {} not found", handle)
            })),
        )
            .into_response()
    }

    async fn user_info(Query(q): Query<HashMap<String, String>>) -> Response {
        let handle = q.get("handles").cloned().unwrap_or_default();
        if handle != "validHandle" {
            return unknown(&handle);
        }
        Json(json!({
            "status": "OK",
            "result": [{ "handle": "validHandle", "rating": 1642, "rank": "expert", "maxRank": "expert" }]
        }))
        .into_response()
    }

    async fn user_status() -> Response {
        Json(json!({
            "status": "OK",
            "result": [
                { "id": 1, "problem": { "contestId": 1900, "index": "A", "name": "Cover in Water" }, "verdict": "OK" },
                { "id": 2, "problem": { "contestId": 1900, "index": "A", "name": "Cover in Water" }, "verdict": "OK" },
                { "id": 3, "problem": { "contestId": 1900, "index": "B", "name": "Laura and Operations" }, "verdict": "WRONG_ANSWER" },
                { "id": 4, "problem": { "contestId": 1899, "index": "C", "name": "Yarik and Array" }, "verdict": "OK" },
                { "id": 5, "problem": { "contestId": 1899, "index": "D", "name": "Yarik and Musical Notes" } }
            ]
        }))
        .into_response()
    }

    async fn user_rating() -> Response {
        Json(json!({
            "status": "OK",
            "result": [
                { "contestId": 1899, "newRating": 1500 },
                { "contestId": 1900, "newRating": 1642 }
            ]
        }))
        .into_response()
    }

    async fn adapter() -> CodeforcesAdapter {
        let router = Router::new()
            .route("/api/user.info", get(user_info))
            .route("/api/user.status", get(user_status))
            .route("/api/user.rating", get(user_rating));
        CodeforcesAdapter::new(Client::new(), spawn_stub(router).await)
    }

    #[tokio::test]
    async fn counts_distinct_accepted_problems() {
        let stats = adapter().await.fetch_stats("validHandle").await.unwrap();

        assert_eq!(stats.solved_count, 2);
        assert_eq!(stats.rating, Some(1642.0));
        assert_eq!(stats.rank_title.as_deref(), Some("expert"));
        assert_eq!(stats.rank, None);
        assert_eq!(stats.contests_participated, Some(2));
    }

    #[tokio::test]
    async fn unknown_handle_is_not_found() {
        let err = adapter().await.fetch_stats("ghost404").await.unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err:?}");
    }

    #[tokio::test]
    async fn other_failures_are_upstream() {
        let router = Router::new().route(
            "/api/user.info",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "status": "FAILED", "comment": "Call limit exceeded" })),
                )
            }),
        );
        let adapter = CodeforcesAdapter::new(Client::new(), spawn_stub(router).await);

        let err = adapter.fetch_stats("validHandle").await.unwrap_err();
        assert!(matches!(err, PlatformError::Upstream { .. }));
    }

    #[tokio::test]
    async fn throttled_rating_history_only_drops_contest_count() {
        let router = Router::new()
            .route("/api/user.info", get(user_info))
            .route("/api/user.status", get(user_status))
            .route(
                "/api/user.rating",
                get(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "status": "FAILED", "comment": "Call limit exceeded" })),
                    )
                }),
            );
        let adapter = CodeforcesAdapter::new(Client::new(), spawn_stub(router).await);

        let stats = adapter.fetch_stats("validHandle").await.unwrap();
        assert_eq!(stats.solved_count, 2);
        assert_eq!(stats.rating, Some(1642.0));
        assert_eq!(stats.contests_participated, None);
    }

    #[tokio::test]
    async fn malformed_body_is_upstream() {
        let router = Router::new().route("/api/user.info", get(|| async { "<html>" }));
        let adapter = CodeforcesAdapter::new(Client::new(), spawn_stub(router).await);

        let err = adapter.fetch_stats("validHandle").await.unwrap_err();
        assert!(matches!(err, PlatformError::Upstream { .. }));
    }
}
