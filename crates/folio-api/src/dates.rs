//! Handler for `GET /dates/format`.

use axum::{
  Json,
  extract::{Query, rejection::QueryRejection},
};
use chrono::NaiveDate;
use folio_core::calendar::{self, DateStyle};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct FormatParams {
  pub date:  NaiveDate,
  /// `long` or `compact`; defaults to `compact`.
  #[serde(default)]
  pub style: DateStyle,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
  pub formatted: String,
}

/// `GET /dates/format?date=<YYYY-MM-DD>[&style=long|compact]`
pub async fn format(
  params: Result<Query<FormatParams>, QueryRejection>,
) -> Result<Json<FormatResponse>, ApiError> {
  let Query(params) = params?;
  Ok(Json(FormatResponse {
    formatted: calendar::format_date(params.date, params.style),
  }))
}
