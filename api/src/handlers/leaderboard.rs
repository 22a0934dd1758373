use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::app::LeaderboardEntry;
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// GET /leaderboard
pub async fn get_leaderboard<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let limit = query.limit.min(500);
    let standings = state.leaderboard_service.standings(limit).await?;
    Ok(Json(standings))
}
