//! Plain-text rendering of a dashboard export for `folio project`.
//!
//! The input file has the same shape as the `POST /api/projections` body.

use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;
use folio_api::projections::{BatchBody, project_dashboard};
use folio_core::projection::ProjectionEngine;

/// Read a dashboard export from `path`.
pub fn read_input(path: &Path) -> anyhow::Result<BatchBody> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading input file {}", path.display()))?;
  serde_json::from_str(&raw)
    .with_context(|| format!("parsing input file {}", path.display()))
}

/// One line per book: its title (or id) and the projection tooltip, or `-`
/// when there is nothing to show.
pub fn render(
  engine: &ProjectionEngine,
  input: &BatchBody,
  today: NaiveDate,
) -> anyhow::Result<String> {
  let rows = project_dashboard(engine, input, today)?;

  let labels: Vec<String> = input
    .books
    .iter()
    .map(|e| {
      if e.book.title.is_empty() {
        e.book.id.to_string()
      } else {
        e.book.title.clone()
      }
    })
    .collect();
  let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

  let mut out = String::new();
  for (label, row) in labels.iter().zip(&rows) {
    let line = row.summary.line.as_str();
    let line = if line.is_empty() { "-" } else { line };
    let pad = width - label.chars().count();
    out.push_str(&format!("{label}{}  {line}\n", " ".repeat(pad)));
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn input() -> BatchBody {
    serde_json::from_value(serde_json::json!({
      "books": [
        {
          "book": {
            "id": "6f1c8a52-3d0e-4c2b-9a51-1b2f0c9d7e10",
            "title": "Vidas Secas",
            "total_pages": 300
          },
          "status": { "status": "reading", "pages_read": 150 }
        },
        {
          "book": {
            "id": "0b7d4c1e-8f2a-4e5b-a3c6-9d8e7f6a5b40",
            "title": "Iracema",
            "total_pages": 120
          },
          "status": { "status": "not_started", "pages_read": 0 }
        }
      ],
      "sessions": [
        { "book_id": "6f1c8a52-3d0e-4c2b-9a51-1b2f0c9d7e10", "page_start": 1,   "page_end": 30,  "day": 10, "month": "março" },
        { "book_id": "6f1c8a52-3d0e-4c2b-9a51-1b2f0c9d7e10", "page_start": 31,  "page_end": 60,  "day": 11, "month": "março" },
        { "book_id": "6f1c8a52-3d0e-4c2b-9a51-1b2f0c9d7e10", "page_start": 61,  "page_end": 90,  "day": 12, "month": "março" },
        { "book_id": "6f1c8a52-3d0e-4c2b-9a51-1b2f0c9d7e10", "page_start": 91,  "page_end": 120, "day": 13, "month": "março" },
        { "book_id": "6f1c8a52-3d0e-4c2b-9a51-1b2f0c9d7e10", "page_start": 121, "page_end": 150, "day": 14, "month": "março" }
      ]
    }))
    .unwrap()
  }

  #[test]
  fn renders_one_aligned_line_per_book() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let out = render(&ProjectionEngine::default(), &input(), today).unwrap();
    assert_eq!(
      out,
      "Vidas Secas  19 mar 2025 · 30.0 páginas/dia · 5 dias restantes\n\
       Iracema      -\n"
    );
  }

  #[test]
  fn invalid_records_are_rejected() {
    let mut input = input();
    input.books[0].book.total_pages = 0;
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    let err = render(&ProjectionEngine::default(), &input, today).unwrap_err();
    assert!(err.to_string().contains("at least one page"), "{err}");
  }

  #[test]
  fn missing_input_file_is_an_error() {
    let err = read_input(Path::new("/nonexistent/dashboard.json")).unwrap_err();
    assert!(err.to_string().contains("reading input file"));
  }
}
