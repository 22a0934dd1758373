//! Profile handlers
//!
//! Endpoints for profile setup, platform usernames and stats sync.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::SyncReport;
use crate::domain::entities::{FetchedStats, Platform, PlatformIdentity, UserId, UserProfile};
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct PlatformUsernameRequest {
    pub username: String,
}

/// Sync outcome plus the placement it produced
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    #[serde(flatten)]
    pub report: SyncReport,
    pub rank_placement: Option<i32>,
}

fn parse_platform(raw: &str) -> Result<Platform, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

/// POST /profiles
pub async fn create_profile<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let profile = state.stats_service.create_profile(&req.username).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /profiles/:id
pub async fn get_profile<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.stats_service.get_profile(&UserId(id)).await?;
    Ok(Json(profile))
}

/// GET /users/:username
pub async fn get_profile_by_username<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .stats_service
        .get_profile_by_username(&username)
        .await?;
    Ok(Json(profile))
}

/// PUT /profiles/:id/platforms/:platform
pub async fn set_platform_username<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Path((id, platform)): Path<(Uuid, String)>,
    Json(req): Json<PlatformUsernameRequest>,
) -> Result<Json<PlatformIdentity>, AppError> {
    let platform = parse_platform(&platform)?;
    let identity = state
        .stats_service
        .set_platform_username(&UserId(id), platform, &req.username)
        .await?;
    Ok(Json(identity))
}

/// DELETE /profiles/:id/platforms/:platform
pub async fn remove_platform_username<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Path((id, platform)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let platform = parse_platform(&platform)?;
    state
        .stats_service
        .remove_platform_username(&UserId(id), platform)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /platforms/:platform/users/:username
///
/// Fetch one judge account's stats directly; nothing is persisted.
pub async fn preview_platform_stats<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Path((platform, username)): Path<(String, String)>,
) -> Result<Json<FetchedStats>, AppError> {
    let platform = parse_platform(&platform)?;
    let stats = state
        .stats_service
        .preview_stats(platform, &username)
        .await?;
    Ok(Json(stats))
}

/// POST /profiles/:id/sync
///
/// Pull fresh stats from every configured platform, then re-rank the leaderboard.
pub async fn sync_stats<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SyncResponse>, AppError> {
    let user_id = UserId(id);
    let report = state.stats_service.sync_stats(&user_id).await?;

    state.leaderboard_service.refresh_placements().await?;
    let rank_placement = state.stats_service.get_profile(&user_id).await?.rank_placement;

    Ok(Json(SyncResponse {
        report,
        rank_placement,
    }))
}
