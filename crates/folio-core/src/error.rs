//! Error types for `folio-core`.
//!
//! The projection engine never fails; these errors come from parsing and
//! record validation, which callers run before handing records to the engine.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown month name: {0:?}")]
  UnknownMonth(String),

  #[error("book must have at least one page")]
  EmptyBook,

  #[error("page_start must be at least 1, got {0}")]
  PageStartOutOfRange(u32),

  #[error("page_end {end} is before page_start {start}")]
  PageRangeReversed { start: u32, end: u32 },

  #[error("day {0} is outside 1-31")]
  DayOutOfRange(u8),

  #[error("day {day} does not exist in {month}")]
  DayNotInMonth { day: u8, month: String },

  #[error("day and month must be given together")]
  IncompleteDayMonth,

  #[error("period_end {end} is before period_start {start}")]
  PeriodReversed {
    start: chrono::NaiveDate,
    end:   chrono::NaiveDate,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
