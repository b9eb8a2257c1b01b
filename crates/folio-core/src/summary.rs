//! Display strings for the dashboard's projection tooltip.

use serde::Serialize;

use crate::{calendar, projection::ReadingProjection};

/// The pieces the dashboard shows next to a book: compact date, pace, days
/// remaining and delay. Fields are `None` when there is nothing to say.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProjectionSummary {
  pub date:           Option<String>,
  pub pace:           Option<String>,
  pub days_remaining: Option<String>,
  pub delay:          Option<String>,
}

fn plural(n: i64, one: &str, many: &str) -> String {
  if n.abs() == 1 {
    format!("{n} {one}")
  } else {
    format!("{n} {many}")
  }
}

impl ProjectionSummary {
  pub fn new(projection: &ReadingProjection) -> Self {
    if !projection.can_show {
      return Self::default();
    }

    let date = projection.estimated_date.map(calendar::format_compact);
    let pace = (projection.pages_per_day > 0.0).then(|| {
      format!("{:.1} páginas/dia", projection.pages_per_day_display())
    });
    let days_remaining = projection
      .estimated_date
      .filter(|_| projection.days_remaining >= 0)
      .map(|_| {
        plural(projection.days_remaining, "dia restante", "dias restantes")
      });
    let delay = projection
      .is_delayed
      .then(|| plural(projection.delay_days, "dia de atraso", "dias de atraso"));

    Self { date, pace, days_remaining, delay }
  }

  /// The tooltip as one line, pieces separated by `" · "`.
  pub fn line(&self) -> String {
    [&self.date, &self.pace, &self.days_remaining, &self.delay]
      .into_iter()
      .flatten()
      .cloned()
      .collect::<Vec<_>>()
      .join(" · ")
  }
}
