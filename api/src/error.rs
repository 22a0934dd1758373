//! Unified error types for the Judgeboard API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `PlatformError`: Judge platform adapter errors
//! - `ContestError`: Contest listing source errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::Platform;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Judge platform adapter errors
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The username does not resolve on the platform
    #[error("{platform} user not found: {username}")]
    NotFound { platform: Platform, username: String },

    /// Transport, status or payload failure talking to the platform
    #[error("{platform} request failed: {message}")]
    Upstream { platform: Platform, message: String },
}

impl PlatformError {
    pub fn not_found(platform: Platform, username: &str) -> Self {
        PlatformError::NotFound {
            platform,
            username: username.to_string(),
        }
    }

    pub fn upstream(platform: Platform, message: impl std::fmt::Display) -> Self {
        PlatformError::Upstream {
            platform,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::NotFound { .. })
    }
}

/// Contest listing source errors
#[derive(Debug, Error)]
pub enum ContestError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, "Already exists", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Platform(e) => match e {
                PlatformError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "Platform user not found", Some(e.to_string()))
                }
                PlatformError::Upstream { .. } => {
                    tracing::warn!("Platform error: {}", e);
                    (StatusCode::BAD_GATEWAY, "Platform service error", Some(e.to_string()))
                }
            },
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
