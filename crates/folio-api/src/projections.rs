//! Handlers for the projection endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/projection`  | Body: `{"book":…,"status":…,"sessions":[…]}` |
//! | `POST` | `/projections` | Body: `{"books":[{"book":…,"status":…}],"sessions":[…]}` |
//!
//! Records are validated before projection; the engine itself accepts
//! anything.

use std::collections::HashSet;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use chrono::NaiveDate;
use folio_core::{
  book::{Book, BookStatus},
  clock::Clock,
  projection::{ProjectionEngine, ReadingProjection},
  session::ReadingSession,
  summary::ProjectionSummary,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

fn validate(
  books: &[&Book],
  sessions: &[ReadingSession],
) -> Result<(), ApiError> {
  for book in books {
    book.validate()?;
  }
  for session in sessions {
    session.validate()?;
  }
  Ok(())
}

// ─── Single ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProjectionBody {
  pub book:     Book,
  #[serde(default)]
  pub status:   Option<BookStatus>,
  #[serde(default)]
  pub sessions: Vec<ReadingSession>,
}

/// `POST /projection`
pub async fn single<C: Clock>(
  State(state): State<ApiState<C>>,
  body: Result<Json<ProjectionBody>, JsonRejection>,
) -> Result<Json<ReadingProjection>, ApiError> {
  let Json(body) = body?;
  validate(&[&body.book], &body.sessions)?;

  let projection = state.engine.project(
    &body.book,
    body.status.as_ref(),
    &body.sessions,
    state.clock.as_ref(),
  );
  tracing::debug!(
    book_id = %body.book.id,
    can_show = projection.can_show,
    "projected book"
  );
  Ok(Json(projection))
}

// ─── Batch ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BookEntry {
  pub book:   Book,
  #[serde(default)]
  pub status: Option<BookStatus>,
}

#[derive(Debug, Deserialize)]
pub struct BatchBody {
  pub books:    Vec<BookEntry>,
  /// Sessions for every listed book, in any order.
  #[serde(default)]
  pub sessions: Vec<ReadingSession>,
}

/// One dashboard row.
#[derive(Debug, Serialize)]
pub struct BookProjection {
  pub book_id:    Uuid,
  pub projection: ReadingProjection,
  pub summary:    SummaryView,
}

/// [`ProjectionSummary`] plus its one-line rendering.
#[derive(Debug, Serialize)]
pub struct SummaryView {
  #[serde(flatten)]
  pub parts: ProjectionSummary,
  pub line:  String,
}

impl From<ProjectionSummary> for SummaryView {
  fn from(parts: ProjectionSummary) -> Self {
    let line = parts.line();
    Self { parts, line }
  }
}

/// Project every book in `body` as of `today`, rejecting duplicate or
/// invalid records.
pub fn project_dashboard(
  engine: &ProjectionEngine,
  body: &BatchBody,
  today: NaiveDate,
) -> Result<Vec<BookProjection>, ApiError> {
  let mut seen = HashSet::new();
  for entry in &body.books {
    if !seen.insert(entry.book.id) {
      return Err(ApiError::BadRequest(format!(
        "book {} listed more than once",
        entry.book.id
      )));
    }
  }
  let books: Vec<&Book> = body.books.iter().map(|e| &e.book).collect();
  validate(&books, &body.sessions)?;

  Ok(
    body
      .books
      .iter()
      .map(|entry| {
        let projection = engine.project_on(
          &entry.book,
          entry.status.as_ref(),
          &body.sessions,
          today,
        );
        BookProjection {
          book_id: entry.book.id,
          projection,
          summary: ProjectionSummary::new(&projection).into(),
        }
      })
      .collect(),
  )
}

/// `POST /projections`
pub async fn batch<C: Clock>(
  State(state): State<ApiState<C>>,
  body: Result<Json<BatchBody>, JsonRejection>,
) -> Result<Json<Vec<BookProjection>>, ApiError> {
  let Json(body) = body?;
  let today = state.clock.today();
  let rows = project_dashboard(&state.engine, &body, today)?;
  tracing::debug!(books = rows.len(), %today, "projected dashboard");
  Ok(Json(rows))
}
