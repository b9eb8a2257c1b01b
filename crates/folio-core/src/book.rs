//! Books and their reading status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, session::ReadingSession};

/// A book on the reader's shelf. Immutable for projection purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
  pub id:                     Uuid,
  #[serde(default)]
  pub title:                  String,
  pub total_pages:            u32,
  /// A deadline set by the reader. When present it is always the displayed
  /// completion date.
  #[serde(default)]
  pub target_completion_date: Option<NaiveDate>,
}

impl Book {
  pub fn new(title: impl Into<String>, total_pages: u32) -> Self {
    Self {
      id: Uuid::new_v4(),
      title: title.into(),
      total_pages,
      target_completion_date: None,
    }
  }

  pub fn with_target(mut self, target: NaiveDate) -> Self {
    self.target_completion_date = Some(target);
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.total_pages == 0 {
      return Err(Error::EmptyBook);
    }
    Ok(())
  }
}

/// Where the reader is with a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
  NotStarted,
  Reading,
  Completed,
}

impl ReadingStatus {
  /// Classify progress by pages read: none is not started, the whole book
  /// (or more) is completed, anything in between is reading.
  pub fn classify(pages_read: u32, total_pages: u32) -> Self {
    if pages_read == 0 {
      Self::NotStarted
    } else if pages_read >= total_pages {
      Self::Completed
    } else {
      Self::Reading
    }
  }

  pub fn is_reading(&self) -> bool { matches!(self, Self::Reading) }
}

/// The stored status record for one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStatus {
  pub status:     ReadingStatus,
  pub pages_read: u32,
}

impl BookStatus {
  pub fn new(status: ReadingStatus, pages_read: u32) -> Self {
    Self { status, pages_read }
  }

  /// The status implied by `pages_read` alone.
  pub fn classified(pages_read: u32, total_pages: u32) -> Self {
    Self::new(ReadingStatus::classify(pages_read, total_pages), pages_read)
  }

  /// The status the record layer stores after the given sessions are logged:
  /// the furthest page reached for `book`, capped at its page count.
  pub fn from_sessions(book: &Book, sessions: &[ReadingSession]) -> Self {
    let furthest = sessions
      .iter()
      .filter(|s| s.book_id == book.id)
      .map(|s| s.page_end)
      .max()
      .unwrap_or(0)
      .min(book.total_pages);
    Self::classified(furthest, book.total_pages)
  }

  /// Pages left to read; zero or negative once the book is finished.
  pub fn pages_remaining(&self, book: &Book) -> i64 {
    i64::from(book.total_pages) - i64::from(self.pages_read)
  }
}

#[cfg(test)]
mod tests {
  use chrono::Month;

  use super::*;

  #[test]
  fn classify_boundaries() {
    assert_eq!(ReadingStatus::classify(0, 300), ReadingStatus::NotStarted);
    assert_eq!(ReadingStatus::classify(1, 300), ReadingStatus::Reading);
    assert_eq!(ReadingStatus::classify(299, 300), ReadingStatus::Reading);
    assert_eq!(ReadingStatus::classify(300, 300), ReadingStatus::Completed);
    assert_eq!(ReadingStatus::classify(310, 300), ReadingStatus::Completed);
  }

  #[test]
  fn status_from_sessions_uses_furthest_page_of_this_book() {
    let book = Book::new("Dom Casmurro", 200);
    let other = Book::new("Iracema", 150);
    let sessions = vec![
      ReadingSession::daily_log(book.id, 1, Month::March, 1, 40),
      ReadingSession::daily_log(book.id, 2, Month::March, 41, 75),
      ReadingSession::daily_log(book.id, 3, Month::March, 10, 20),
      ReadingSession::daily_log(other.id, 1, Month::March, 1, 140),
    ];
    let status = BookStatus::from_sessions(&book, &sessions);
    assert_eq!(status, BookStatus::new(ReadingStatus::Reading, 75));
  }

  #[test]
  fn status_from_sessions_caps_at_page_count() {
    let book = Book::new("Dom Casmurro", 200);
    let sessions =
      vec![ReadingSession::daily_log(book.id, 1, Month::March, 150, 230)];
    let status = BookStatus::from_sessions(&book, &sessions);
    assert_eq!(status, BookStatus::new(ReadingStatus::Completed, 200));
  }

  #[test]
  fn status_without_sessions_is_not_started() {
    let book = Book::new("Dom Casmurro", 200);
    assert_eq!(
      BookStatus::from_sessions(&book, &[]).status,
      ReadingStatus::NotStarted
    );
  }

  #[test]
  fn empty_book_is_invalid() {
    assert_eq!(Book::new("Blank", 0).validate(), Err(Error::EmptyBook));
    assert_eq!(Book::new("Not blank", 1).validate(), Ok(()));
  }

  #[test]
  fn status_serialises_snake_case() {
    let json =
      serde_json::to_string(&BookStatus::new(ReadingStatus::NotStarted, 0))
        .unwrap();
    assert_eq!(json, r#"{"status":"not_started","pages_read":0}"#);
  }
}
