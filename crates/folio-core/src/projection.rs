//! The reading progress projection engine.
//!
//! Given a book, its status and the session history, [`ProjectionEngine`]
//! answers: is the reader on track, how many pages a day are they managing,
//! and when will they finish? Projections are recomputed on demand and never
//! stored.
//!
//! The engine never fails. Missing or insufficient data degrades to a
//! projection with `can_show == false` or zeroed fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  book::{Book, BookStatus},
  calendar,
  clock::Clock,
  reading_days::{self, RateWindow},
  session::ReadingSession,
};

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Thresholds the engine works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionPolicy {
  /// Length of the trailing window pace is preferably measured over.
  pub rate_window_days:    i64,
  /// Reading days needed before a pace is trusted.
  pub min_reading_days:    u32,
  /// Sessions the trailing window needs before it is used instead of the
  /// full history.
  pub min_recent_sessions: usize,
  /// Days without reading that do not yet count as delay.
  pub delay_grace_days:    i64,
}

impl Default for ProjectionPolicy {
  fn default() -> Self {
    Self {
      rate_window_days:    30,
      min_reading_days:    3,
      min_recent_sessions: 3,
      delay_grace_days:    1,
    }
  }
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// The computed read model for one book. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadingProjection {
  pub estimated_date:        Option<NaiveDate>,
  pub days_remaining:        i64,
  /// Carried at full precision; see [`Self::pages_per_day_display`].
  pub pages_per_day:         f64,
  pub reading_days_observed: u32,
  pub is_delayed:            bool,
  pub delay_days:            i64,
  pub can_show:              bool,
  pub has_target_date:       bool,
  pub target_date:           Option<NaiveDate>,
}

impl ReadingProjection {
  /// Nothing to show.
  pub fn empty() -> Self { Self::default() }

  /// Pace rounded to one decimal place.
  pub fn pages_per_day_display(&self) -> f64 {
    (self.pages_per_day * 10.0).round() / 10.0
  }
}

/// Delay since the last reading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Delay {
  is_delayed: bool,
  days:       i64,
}

impl Delay {
  fn since(
    last_read: Option<NaiveDate>,
    today: NaiveDate,
    grace_days: i64,
  ) -> Self {
    match last_read {
      Some(last) => {
        let gap = calendar::days_between(last, today);
        if gap > grace_days {
          Self { is_delayed: true, days: gap - grace_days }
        } else {
          Self::default()
        }
      }
      None => Self::default(),
    }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
  policy: ProjectionPolicy,
}

impl ProjectionEngine {
  pub fn new(policy: ProjectionPolicy) -> Self { Self { policy } }

  /// Project `book` using the date reported by `clock`.
  ///
  /// `sessions` may hold sessions for any number of books; only those
  /// belonging to `book` are considered.
  pub fn project<C: Clock + ?Sized>(
    &self,
    book: &Book,
    status: Option<&BookStatus>,
    sessions: &[ReadingSession],
    clock: &C,
  ) -> ReadingProjection {
    self.project_on(book, status, sessions, clock.today())
  }

  /// Project `book` as of `today`.
  pub fn project_on(
    &self,
    book: &Book,
    status: Option<&BookStatus>,
    sessions: &[ReadingSession],
    today: NaiveDate,
  ) -> ReadingProjection {
    let Some(status) = status.filter(|s| s.status.is_reading()) else {
      return ReadingProjection::empty();
    };

    let sessions: Vec<&ReadingSession> =
      sessions.iter().filter(|s| s.book_id == book.id).collect();

    match book.target_completion_date {
      Some(target) => self.towards_target(book, status, &sessions, target, today),
      None => self.from_pace(book, status, &sessions, today),
    }
  }

  /// A reader-set deadline overrides the inferred pace.
  fn towards_target(
    &self,
    book: &Book,
    status: &BookStatus,
    sessions: &[&ReadingSession],
    target: NaiveDate,
    today: NaiveDate,
  ) -> ReadingProjection {
    let days_remaining = calendar::days_between(today, target);
    let pages_remaining = status.pages_remaining(book).max(0);
    let pages_per_day = if days_remaining > 0 {
      pages_remaining as f64 / days_remaining as f64
    } else {
      0.0
    };
    let is_delayed = days_remaining < 0;

    ReadingProjection {
      estimated_date: Some(target),
      days_remaining,
      pages_per_day,
      reading_days_observed: reading_days::reading_days_observed(
        sessions.iter().copied(),
      ),
      is_delayed,
      delay_days: if is_delayed { days_remaining.abs() } else { 0 },
      can_show: true,
      has_target_date: true,
      target_date: Some(target),
    }
  }

  /// Forecast from the pace observed in the session history.
  fn from_pace(
    &self,
    book: &Book,
    status: &BookStatus,
    sessions: &[&ReadingSession],
    today: NaiveDate,
  ) -> ReadingProjection {
    let observed = reading_days::reading_days_observed(sessions.iter().copied());
    let last_read =
      reading_days::last_reading_date(sessions.iter().copied(), today);
    let delay = Delay::since(last_read, today, self.policy.delay_grace_days);

    // Pace-free projection: shown, but carrying only the delay warning.
    let pending = ReadingProjection {
      reading_days_observed: observed,
      is_delayed: delay.is_delayed,
      delay_days: delay.days,
      can_show: true,
      ..ReadingProjection::empty()
    };

    if observed < self.policy.min_reading_days {
      return pending;
    }

    let pages_remaining = status.pages_remaining(book);
    if pages_remaining <= 0 {
      return ReadingProjection::empty();
    }

    let window = reading_days::first_sufficient(
      [RateWindow::recent(sessions, today, self.policy.rate_window_days)],
      RateWindow::full_history(sessions),
      self.policy.min_recent_sessions,
    );
    let window_days = window.reading_days();
    if window_days == 0 {
      return pending;
    }

    let pages_per_day = f64::from(status.pages_read) / f64::from(window_days);
    if pages_per_day <= 0.0 {
      return pending;
    }

    let days_to_finish = (pages_remaining as f64 / pages_per_day).ceil() as i64;
    let days_remaining = days_to_finish + delay.days;

    ReadingProjection {
      estimated_date: Some(calendar::add_days(today, days_remaining)),
      days_remaining,
      pages_per_day,
      ..pending
    }
  }
}

/// Project `book` with the default policy.
pub fn project<C: Clock + ?Sized>(
  book: &Book,
  status: Option<&BookStatus>,
  sessions: &[ReadingSession],
  clock: &C,
) -> ReadingProjection {
  ProjectionEngine::default().project(book, status, sessions, clock)
}
