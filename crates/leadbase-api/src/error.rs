//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  Validation(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  /// Translate a store-layer error into the matching status signal.
  pub fn from_store<E: Into<leadbase_core::Error>>(e: E) -> Self {
    match e.into() {
      leadbase_core::Error::NotFound(id) => {
        ApiError::NotFound(format!("company {id} not found"))
      }
      leadbase_core::Error::Validation(msg) => ApiError::Validation(msg),
      leadbase_core::Error::DuplicateRegistry(registry) => {
        ApiError::Conflict(format!("registry number {registry} already in use"))
      }
      leadbase_core::Error::Storage(msg) => ApiError::Internal(msg),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
