//! Handlers for the status helpers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/status/classify` | Body: `{"pages_read":12,"total_pages":300}` |
//! | `POST` | `/status/derive`   | Body: `{"book":…,"sessions":[…]}` |

use axum::{Json, extract::rejection::JsonRejection};
use folio_core::{
  Error,
  book::{Book, BookStatus, ReadingStatus},
  session::ReadingSession,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
  pub pages_read:  u32,
  pub total_pages: u32,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
  pub status: ReadingStatus,
}

/// `POST /status/classify`
pub async fn classify(
  body: Result<Json<ClassifyBody>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
  let Json(body) = body?;
  if body.total_pages == 0 {
    return Err(Error::EmptyBook.into());
  }
  Ok(Json(ClassifyResponse {
    status: ReadingStatus::classify(body.pages_read, body.total_pages),
  }))
}

#[derive(Debug, Deserialize)]
pub struct DeriveBody {
  pub book:     Book,
  #[serde(default)]
  pub sessions: Vec<ReadingSession>,
}

/// `POST /status/derive`
///
/// The status record implied by the logged sessions, for clients that keep
/// only the session history.
pub async fn derive(
  body: Result<Json<DeriveBody>, JsonRejection>,
) -> Result<Json<BookStatus>, ApiError> {
  let Json(body) = body?;
  body.book.validate()?;
  for session in &body.sessions {
    session.validate()?;
  }
  Ok(Json(BookStatus::from_sessions(&body.book, &body.sessions)))
}
