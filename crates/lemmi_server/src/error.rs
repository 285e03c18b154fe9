//! # Server Error Types
//!
//! `ServerError` covers startup (config, bind). `ApiError` is what a
//! handler returns; it turns itself into a status code plus a fixed JSON
//! body, and logs whatever detail the client does not get to see.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lemmi_shared::{ErrorBody, ValidationError};
use thiserror::Error;

/// Errors that stop the server from starting.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Config file unreadable or invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Socket or runtime failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server startup.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors the store can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No free referral code was found.
    #[error("no unused referral code after {attempts} attempts")]
    ReferralCodesExhausted {
        /// Codes drawn before giving up.
        attempts: u32,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Records that can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A wallet record.
    Wallet,
    /// A referral record.
    Referral,
    /// A skill reward record.
    SkillReward,
}

/// Errors returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A field broke a validation rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The body was not the JSON we expect.
    #[error("malformed body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// A path segment could not be decoded.
    #[error("malformed path: {0}")]
    MalformedPath(#[from] PathRejection),

    /// The record does not exist.
    #[error("{0:?} not found")]
    NotFound(Resource),

    /// The store failed.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Status code sent to the client.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::MalformedPath(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed message sent to the client.
    #[must_use]
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::EmptyAddress)
            | Self::Validation(ValidationError::AddressTooLong { .. })
            | Self::Validation(ValidationError::InvalidAddressChar(_)) => "Invalid wallet address",
            Self::Validation(ValidationError::InvalidGameName) => "Invalid game name",
            Self::Validation(ValidationError::InvalidReferralCode) => "Invalid referral code",
            Self::Validation(ValidationError::NotFinite(_)) => "Invalid number",
            Self::MalformedBody(_) => "Invalid request body",
            Self::MalformedPath(_) => "Invalid request path",
            Self::NotFound(Resource::Wallet) => "Wallet not found",
            Self::NotFound(Resource::Referral) => "Referral not found",
            Self::NotFound(Resource::SkillReward) => "Skill reward not found",
            Self::Store(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            error: self.client_message().to_owned(),
        };
        (status, Json(body)).into_response()
    }
}
