//! HTTP error mapping
//!
//! Every failure leaves the gateway as `{ "error": ... }` JSON with a status
//! code picked from the library error. Internal detail stays in the log.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use demographics::DemographicsError;
use serde_json::json;
use territory_lock::LockError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    Demographics(#[from] DemographicsError),
    #[error("Invalid JSON body: {0}")]
    BadJson(#[from] JsonRejection),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// `Json` extractor whose rejection is reported through [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Lock(LockError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
            }
            ApiError::Lock(LockError::InvalidRequest) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Must specify territoryId or holdId" }),
            ),
            ApiError::Lock(LockError::Conflict(conflict)) => (
                StatusCode::CONFLICT,
                json!({ "error": "Territory conflict detected", "conflict": conflict }),
            ),
            ApiError::Lock(LockError::AlreadyHeld {
                hold_id,
                expires_at,
                conflict,
            }) => (
                StatusCode::CONFLICT,
                json!({
                    "error": "Territory already on hold",
                    "holdId": hold_id,
                    "holdExpires": expires_at,
                    "conflict": conflict,
                }),
            ),
            ApiError::Lock(LockError::Internal(detail)) => {
                tracing::error!(detail = %detail, "Territory store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Territory operation failed" }),
                )
            }
            ApiError::Demographics(e) => {
                tracing::warn!(error = %e, "Demographics unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Demographic data unavailable for this area" }),
                )
            }
            ApiError::BadJson(rejection) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Invalid request body: {}", rejection.body_text()) }),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ApiError::NotConfigured(what) => {
                tracing::error!("{} is not configured", what);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("{} not configured", what) }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
