//! LeetCode adapter
//!
//! Uses the public GraphQL endpoint. A null `matchedUser` means the username
//! does not exist.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{FetchedStats, Platform};
use crate::domain::ports::PlatformAdapter;
use crate::error::PlatformError;

const PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  matchedUser(username: $username) {
    username
    submitStats: submitStatsGlobal {
      acSubmissionNum {
        difficulty
        count
      }
    }
    profile {
      ranking
    }
  }
  userContestRanking(username: $username) {
    attendedContestsCount
    rating
  }
}
"#;

/// LeetCode GraphQL client
pub struct LeetCodeAdapter {
    http: Client,
    base_url: String,
}

impl LeetCodeAdapter {
    pub fn new(http: Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ProfileData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    matched_user: Option<MatchedUser>,
    user_contest_ranking: Option<ContestRanking>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    submit_stats: Option<SubmitStats>,
    profile: Option<UserProfileInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    #[serde(default)]
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Deserialize)]
struct DifficultyCount {
    difficulty: String,
    count: i64,
}

#[derive(Deserialize)]
struct UserProfileInfo {
    ranking: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestRanking {
    attended_contests_count: Option<i64>,
    rating: Option<f64>,
}

#[async_trait]
impl PlatformAdapter for LeetCodeAdapter {
    fn platform(&self) -> Platform {
        Platform::Leetcode
    }

    async fn fetch_stats(&self, username: &str) -> Result<FetchedStats, PlatformError> {
        let platform = self.platform();
        let body = GraphQlRequest {
            query: PROFILE_QUERY,
            variables: Variables { username },
        };

        let response = self
            .http
            .post(format!("{}/graphql", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::upstream(platform, e))?;

        let payload: GraphQlResponse =
            super::read_json(platform, username, response).await?;

        let data = payload
            .data
            .ok_or_else(|| PlatformError::not_found(platform, username))?;
        let user = data
            .matched_user
            .ok_or_else(|| PlatformError::not_found(platform, username))?;

        let solved_count = user
            .submit_stats
            .and_then(|s| {
                s.ac_submission_num
                    .into_iter()
                    .find(|d| d.difficulty.eq_ignore_ascii_case("all"))
            })
            .map(|d| d.count)
            .ok_or_else(|| PlatformError::not_found(platform, username))?;

        let contest = data.user_contest_ranking;

        Ok(FetchedStats {
            solved_count,
            rank: user.profile.and_then(|p| p.ranking),
            rank_title: None,
            rating: contest.as_ref().and_then(|c| c.rating),
            contests_participated: contest.and_then(|c| c.attended_contests_count),
        })
    }
}
