//! Reading-day aggregation over a book's session history.
//!
//! A reading day is a distinct [`SessionDateKey`]. Several sessions logged on
//! the same day (a chapter at a time, say) collapse into one [`DailyRange`]
//! holding the lowest start page and the highest end page reached that day.
//!
//! Pace is measured over a [`RateWindow`]. The recent window and the full
//! history are built by independent passes; [`first_sufficient`] picks which
//! one to use.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
  calendar,
  session::{ReadingSession, SessionDateKey},
};

// ─── Daily ranges ────────────────────────────────────────────────────────────

/// The pages covered on one reading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRange {
  pub key:        SessionDateKey,
  pub first_page: u32,
  pub last_page:  u32,
}

/// Collapse sessions into one range per reading day, in order of first
/// appearance. Sessions without a date key are skipped.
pub fn daily_ranges<'a, I>(sessions: I) -> Vec<DailyRange>
where
  I: IntoIterator<Item = &'a ReadingSession>,
{
  let mut index: HashMap<SessionDateKey, usize> = HashMap::new();
  let mut days: Vec<DailyRange> = Vec::new();

  for session in sessions {
    let Some(key) = session.date_key() else {
      continue;
    };
    match index.get(&key) {
      Some(&i) => {
        let day = &mut days[i];
        day.first_page = day.first_page.min(session.page_start);
        day.last_page = day.last_page.max(session.page_end);
      }
      None => {
        index.insert(key, days.len());
        days.push(DailyRange {
          key,
          first_page: session.page_start,
          last_page: session.page_end,
        });
      }
    }
  }

  days
}

/// Number of distinct reading days across `sessions`.
pub fn reading_days_observed<'a, I>(sessions: I) -> u32
where
  I: IntoIterator<Item = &'a ReadingSession>,
{
  u32::try_from(daily_ranges(sessions).len()).unwrap_or(u32::MAX)
}

/// The most recent resolved date across `sessions`.
pub fn last_reading_date<'a, I>(sessions: I, today: NaiveDate) -> Option<NaiveDate>
where
  I: IntoIterator<Item = &'a ReadingSession>,
{
  sessions
    .into_iter()
    .filter_map(|s| s.resolved_date(today))
    .max()
}

// ─── Rate windows ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
  /// Sessions from the trailing window ending today.
  Recent,
  FullHistory,
}

/// A selection of sessions that pace is averaged over.
#[derive(Debug, Clone)]
pub struct RateWindow<'a> {
  pub kind:     WindowKind,
  pub sessions: Vec<&'a ReadingSession>,
}

impl<'a> RateWindow<'a> {
  /// Sessions dated no earlier than `window_days` before `today`.
  pub fn recent(
    sessions: &[&'a ReadingSession],
    today: NaiveDate,
    window_days: i64,
  ) -> Self {
    let cutoff = calendar::add_days(today, -window_days);
    Self {
      kind:     WindowKind::Recent,
      sessions: sessions
        .iter()
        .copied()
        .filter(|s| s.resolved_date(today).is_some_and(|d| d >= cutoff))
        .collect(),
    }
  }

  pub fn full_history(sessions: &[&'a ReadingSession]) -> Self {
    Self {
      kind:     WindowKind::FullHistory,
      sessions: sessions.to_vec(),
    }
  }

  pub fn session_count(&self) -> usize { self.sessions.len() }

  pub fn daily_ranges(&self) -> Vec<DailyRange> {
    daily_ranges(self.sessions.iter().copied())
  }

  pub fn reading_days(&self) -> u32 {
    u32::try_from(self.daily_ranges().len()).unwrap_or(u32::MAX)
  }
}

/// The first candidate holding at least `min_sessions` sessions, or
/// `fallback` if none does.
pub fn first_sufficient<'a, I>(
  candidates: I,
  fallback: RateWindow<'a>,
  min_sessions: usize,
) -> RateWindow<'a>
where
  I: IntoIterator<Item = RateWindow<'a>>,
{
  candidates
    .into_iter()
    .find(|w| w.session_count() >= min_sessions)
    .unwrap_or(fallback)
}
