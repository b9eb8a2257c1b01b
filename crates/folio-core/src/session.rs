//! Reading sessions and the key that identifies the day each one happened.
//!
//! Sessions come from two input modes. The period form records explicit
//! dates; the daily-log form records only a day of the month and a month
//! name. [`SessionDateKey`] carries either, and [`SessionDateKey::resolve`] is
//! the single place where a day/month pair is turned into a full date.

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, calendar};

// ─── Date key ────────────────────────────────────────────────────────────────

/// The calendar day a session belongs to, as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionDateKey {
  ExplicitDate(NaiveDate),
  /// A daily-log entry with no year.
  DayMonth { day: u8, month: Month },
}

impl SessionDateKey {
  /// The full calendar date of this key relative to `today`.
  ///
  /// Day/month keys are placed in the current year, or the previous one when
  /// the current year would put them in the future.
  pub fn resolve(&self, today: NaiveDate) -> Option<NaiveDate> {
    match *self {
      Self::ExplicitDate(date) => Some(date),
      Self::DayMonth { day, month } => {
        calendar::resolve_day_month(day, month, today)
      }
    }
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// One logged reading event. Sessions are immutable; an edit replaces the
/// whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSession {
  pub book_id:      Uuid,
  pub page_start:   u32,
  pub page_end:     u32,
  #[serde(default)]
  pub period_start: Option<NaiveDate>,
  #[serde(default)]
  pub period_end:   Option<NaiveDate>,
  /// Day of the month, for daily-log entries.
  #[serde(default)]
  pub day:          Option<u8>,
  #[serde(default, with = "calendar::month_serde")]
  pub month:        Option<Month>,
}

impl ReadingSession {
  /// A period-form session logged on a single date.
  pub fn on_date(
    book_id: Uuid,
    date: NaiveDate,
    page_start: u32,
    page_end: u32,
  ) -> Self {
    Self {
      book_id,
      page_start,
      page_end,
      period_start: Some(date),
      period_end: Some(date),
      day: None,
      month: None,
    }
  }

  /// A daily-log session with only a day and month.
  pub fn daily_log(
    book_id: Uuid,
    day: u8,
    month: Month,
    page_start: u32,
    page_end: u32,
  ) -> Self {
    Self {
      book_id,
      page_start,
      page_end,
      period_start: None,
      period_end: None,
      day: Some(day),
      month: Some(month),
    }
  }

  /// The day this session is counted under: `period_start`, then
  /// `period_end`, then the day/month pair. `None` if none was recorded.
  pub fn date_key(&self) -> Option<SessionDateKey> {
    if let Some(date) = self.period_start.or(self.period_end) {
      return Some(SessionDateKey::ExplicitDate(date));
    }
    match (self.day, self.month) {
      (Some(day), Some(month)) => Some(SessionDateKey::DayMonth { day, month }),
      _ => None,
    }
  }

  /// The resolved calendar date of this session relative to `today`.
  pub fn resolved_date(&self, today: NaiveDate) -> Option<NaiveDate> {
    self.date_key().and_then(|key| key.resolve(today))
  }

  /// Check the record invariants the engine assumes.
  pub fn validate(&self) -> Result<()> {
    if self.page_start < 1 {
      return Err(Error::PageStartOutOfRange(self.page_start));
    }
    if self.page_end < self.page_start {
      return Err(Error::PageRangeReversed {
        start: self.page_start,
        end:   self.page_end,
      });
    }
    if let (Some(start), Some(end)) = (self.period_start, self.period_end)
      && end < start
    {
      return Err(Error::PeriodReversed { start, end });
    }
    match (self.day, self.month) {
      (None, None) => Ok(()),
      (Some(day), Some(month)) => {
        if !(1..=31).contains(&day) {
          Err(Error::DayOutOfRange(day))
        } else if !calendar::day_exists_in(day, month) {
          Err(Error::DayNotInMonth {
            day,
            month: calendar::month_name(month).to_owned(),
          })
        } else {
          Ok(())
        }
      }
      _ => Err(Error::IncompleteDayMonth),
    }
  }
}
