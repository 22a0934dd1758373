//! Judge platform adapters
//!
//! One `PlatformAdapter` per coding judge. Each adapter only translates its
//! judge's wire shape into `FetchedStats`.

pub mod codeforces;
pub mod hackerrank;
pub mod leetcode;

pub use codeforces::CodeforcesAdapter;
pub use hackerrank::HackerRankAdapter;
pub use leetcode::LeetCodeAdapter;

use serde::de::DeserializeOwned;

use crate::domain::entities::Platform;
use crate::error::PlatformError;

/// Map status codes and decode a JSON body.
///
/// 404 means the username does not resolve; every other failure is upstream.
async fn read_json<T: DeserializeOwned>(
    platform: Platform,
    username: &str,
    response: reqwest::Response,
) -> Result<T, PlatformError> {
    let status = response.status();

    if status.as_u16() == 404 {
        return Err(PlatformError::not_found(platform, username));
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(PlatformError::upstream(
            platform,
            format!("{} - {}", status.as_u16(), message),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| PlatformError::upstream(platform, format!("invalid body: {}", e)))
}
