//! Tournament handlers
//!
//! Listings are fetched fresh on every request; filters apply afterwards.

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::app::TournamentListing;
use crate::domain::entities::TournamentFilter;
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;
use crate::AppState;

/// Raw filter params; each is optional and validated before fetching
#[derive(Debug, Default, Deserialize)]
pub struct TournamentQuery {
    pub category: Option<String>,
    pub platform: Option<String>,
    pub duration: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
}

fn parse_opt<T: FromStr<Err = String>>(raw: Option<&str>) -> Result<Option<T>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty() && *s != "all") {
        Some(s) => s.parse().map(Some).map_err(AppError::BadRequest),
        None => Ok(None),
    }
}

impl TryFrom<TournamentQuery> for TournamentFilter {
    type Error = AppError;

    fn try_from(query: TournamentQuery) -> Result<Self, Self::Error> {
        Ok(TournamentFilter {
            category: parse_opt(query.category.as_deref())?,
            platform: query
                .platform
                .filter(|p| !p.trim().is_empty() && p != "all"),
            duration: parse_opt(query.duration.as_deref())?,
            status: parse_opt(query.status.as_deref())?,
            search: query.q,
        })
    }
}

/// GET /tournaments
pub async fn list_tournaments<R: ProfileRepository + 'static>(
    State(state): State<AppState<R>>,
    Query(query): Query<TournamentQuery>,
) -> Result<Json<TournamentListing>, AppError> {
    let filter = TournamentFilter::try_from(query)?;
    Ok(Json(state.contest_service.list(&filter).await))
}
