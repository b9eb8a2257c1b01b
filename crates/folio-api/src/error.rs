//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Every variant answers `400` with a `{"error": …}` body, including bodies
/// and query strings that fail to deserialize.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("invalid record: {0}")]
  Invalid(#[from] folio_core::Error),

  #[error("malformed body: {0}")]
  Body(#[from] JsonRejection),

  #[error("malformed query: {0}")]
  Query(#[from] QueryRejection),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = match &self {
      ApiError::BadRequest(m) => m.clone(),
      ApiError::Invalid(e) => e.to_string(),
      ApiError::Body(r) => r.body_text(),
      ApiError::Query(r) => r.body_text(),
    };
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
  }
}
