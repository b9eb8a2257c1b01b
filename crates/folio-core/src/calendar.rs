//! Calendar helpers: whole-day arithmetic, month-name parsing, day/month year
//! inference, and the Portuguese date formats used by the dashboard.
//!
//! All arithmetic is done on [`NaiveDate`]; time of day never enters into it.

use chrono::{Datelike, Days, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Month names ─────────────────────────────────────────────────────────────

const MONTHS_PT: [&str; 12] = [
  "janeiro",
  "fevereiro",
  "março",
  "abril",
  "maio",
  "junho",
  "julho",
  "agosto",
  "setembro",
  "outubro",
  "novembro",
  "dezembro",
];

const MONTHS_PT_SHORT: [&str; 12] = [
  "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov",
  "dez",
];

fn month_index(month: Month) -> usize { month.number_from_month() as usize - 1 }

/// Full lowercase Portuguese name, e.g. `"março"`.
pub fn month_name(month: Month) -> &'static str { MONTHS_PT[month_index(month)] }

/// Three-letter lowercase Portuguese abbreviation, e.g. `"mar"`.
pub fn month_abbreviation(month: Month) -> &'static str {
  MONTHS_PT_SHORT[month_index(month)]
}

fn fold(input: &str) -> String {
  input
    .trim()
    .trim_end_matches('.')
    .to_lowercase()
    .replace('ç', "c")
}

/// Parse a month written the way the daily-log form records it.
///
/// Accepts Portuguese names with or without the cedilla (`"março"`,
/// `"marco"`), their three-letter abbreviations, English names and
/// abbreviations, and numbers `1`-`12`. Matching is case-insensitive.
pub fn parse_month(input: &str) -> Result<Month> {
  let folded = fold(input);

  if let Ok(number) = folded.parse::<u8>() {
    return Month::try_from(number)
      .map_err(|_| Error::UnknownMonth(input.to_owned()));
  }

  let portuguese = MONTHS_PT.iter().position(|name| {
    let name = fold(name);
    name == folded || (folded.len() == 3 && name.starts_with(&folded))
  });
  if let Some(index) = portuguese {
    // `index` is at most 11, so the conversion cannot fail.
    return Month::try_from(index as u8 + 1)
      .map_err(|_| Error::UnknownMonth(input.to_owned()));
  }

  folded
    .parse::<Month>()
    .map_err(|_| Error::UnknownMonth(input.to_owned()))
}

/// Whether `day` exists in `month` in at least one year (29 February counts).
pub fn day_exists_in(day: u8, month: Month) -> bool {
  NaiveDate::from_ymd_opt(2000, month.number_from_month(), u32::from(day))
    .is_some()
}

/// Serde adapter for `Option<Month>` fields.
///
/// Serialises the Portuguese name; deserialises anything [`parse_month`]
/// accepts, plus bare JSON numbers.
pub mod month_serde {
  use chrono::Month;
  use serde::{Deserialize, Deserializer, Serializer};

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawMonth {
    Number(u8),
    Name(String),
  }

  pub fn serialize<S>(
    month: &Option<Month>,
    serializer: S,
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match month {
      Some(month) => serializer.serialize_str(super::month_name(*month)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Month>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Option::<RawMonth>::deserialize(deserializer)?;
    raw
      .map(|raw| match raw {
        RawMonth::Number(n) => super::parse_month(&n.to_string()),
        RawMonth::Name(name) => super::parse_month(&name),
      })
      .transpose()
      .map_err(serde::de::Error::custom)
  }
}

// ─── Arithmetic ──────────────────────────────────────────────────────────────

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
  (to - from).num_days()
}

/// Shift `date` by a signed number of days, saturating at the calendar range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
  let delta = Days::new(days.unsigned_abs());
  let shifted = if days >= 0 {
    date.checked_add_days(delta)
  } else {
    date.checked_sub_days(delta)
  };
  shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Infer the full date of a day/month log entry relative to `today`.
///
/// The entry is placed in the current year unless that lands after `today`
/// (or does not exist, like 29 February in a common year), in which case it is
/// placed in the previous year. Returns `None` if neither year has that day.
pub fn resolve_day_month(
  day: u8,
  month: Month,
  today: NaiveDate,
) -> Option<NaiveDate> {
  let month = month.number_from_month();
  let day = u32::from(day);
  match NaiveDate::from_ymd_opt(today.year(), month, day) {
    Some(date) if date <= today => Some(date),
    _ => NaiveDate::from_ymd_opt(today.year() - 1, month, day),
  }
}

// ─── Formatting ──────────────────────────────────────────────────────────────

/// Which of the two display formats to render.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
  /// `"14 de março de 2025"`
  Long,
  /// `"14 mar 2025"`
  #[default]
  Compact,
}

/// `"14 de março de 2025"`; the day is not padded.
pub fn format_long(date: NaiveDate) -> String {
  format!(
    "{} de {} de {}",
    date.day(),
    MONTHS_PT[date.month0() as usize],
    date.year()
  )
}

/// `"14 mar 2025"`; the day is padded to two digits (`"05 mar 2025"`).
pub fn format_compact(date: NaiveDate) -> String {
  format!(
    "{:02} {} {}",
    date.day(),
    MONTHS_PT_SHORT[date.month0() as usize],
    date.year()
  )
}

pub fn format_date(date: NaiveDate, style: DateStyle) -> String {
  match style {
    DateStyle::Long => format_long(date),
    DateStyle::Compact => format_compact(date),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn parses_portuguese_english_and_numeric_months() {
    assert_eq!(parse_month("março").unwrap(), Month::March);
    assert_eq!(parse_month("Marco").unwrap(), Month::March);
    assert_eq!(parse_month("FEV").unwrap(), Month::February);
    assert_eq!(parse_month("set.").unwrap(), Month::September);
    assert_eq!(parse_month("October").unwrap(), Month::October);
    assert_eq!(parse_month("dec").unwrap(), Month::December);
    assert_eq!(parse_month("12").unwrap(), Month::December);
  }

  #[test]
  fn rejects_unknown_months() {
    assert_eq!(
      parse_month("brumaire"),
      Err(Error::UnknownMonth("brumaire".into()))
    );
    assert!(parse_month("13").is_err());
    assert!(parse_month("0").is_err());
  }

  #[test]
  fn day_month_resolves_in_current_year_when_not_in_future() {
    let today = date(2025, 3, 14);
    assert_eq!(
      resolve_day_month(10, Month::March, today),
      Some(date(2025, 3, 10))
    );
    assert_eq!(
      resolve_day_month(14, Month::March, today),
      Some(date(2025, 3, 14))
    );
  }

  #[test]
  fn day_month_in_future_rolls_back_a_year() {
    let today = date(2025, 1, 3);
    assert_eq!(
      resolve_day_month(28, Month::December, today),
      Some(date(2024, 12, 28))
    );
  }

  #[test]
  fn leap_day_falls_back_to_previous_leap_year() {
    let today = date(2025, 3, 1);
    assert_eq!(
      resolve_day_month(29, Month::February, today),
      Some(date(2024, 2, 29))
    );
    assert_eq!(resolve_day_month(29, Month::February, date(2026, 3, 1)), None);
  }

  #[test]
  fn day_arithmetic_ignores_year_boundaries() {
    assert_eq!(days_between(date(2024, 12, 30), date(2025, 1, 2)), 3);
    assert_eq!(days_between(date(2025, 1, 2), date(2024, 12, 30)), -3);
    assert_eq!(add_days(date(2024, 12, 30), 3), date(2025, 1, 2));
    assert_eq!(add_days(date(2025, 1, 2), -3), date(2024, 12, 30));
  }

  #[test]
  fn add_days_saturates() {
    assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
  }

  #[test]
  fn long_format() {
    assert_eq!(format_long(date(2025, 3, 14)), "14 de março de 2025");
    assert_eq!(format_long(date(2025, 7, 5)), "5 de julho de 2025");
  }

  #[test]
  fn compact_format() {
    assert_eq!(format_compact(date(2025, 3, 14)), "14 mar 2025");
    assert_eq!(format_compact(date(2025, 2, 5)), "05 fev 2025");
    assert_eq!(format_compact(date(2025, 12, 31)), "31 dez 2025");
    assert_eq!(
      format_date(date(2025, 9, 1), DateStyle::Compact),
      "01 set 2025"
    );
  }

  #[test]
  fn month_serde_accepts_names_and_numbers() {
    #[derive(Deserialize, Serialize)]
    struct Row {
      #[serde(default, with = "month_serde")]
      month: Option<Month>,
    }

    let row: Row = serde_json::from_str(r#"{"month":"abril"}"#).unwrap();
    assert_eq!(row.month, Some(Month::April));
    let row: Row = serde_json::from_str(r#"{"month":4}"#).unwrap();
    assert_eq!(row.month, Some(Month::April));
    let row: Row = serde_json::from_str(r#"{}"#).unwrap();
    assert_eq!(row.month, None);
    assert!(serde_json::from_str::<Row>(r#"{"month":"nope"}"#).is_err());

    let json =
      serde_json::to_string(&Row { month: Some(Month::March) }).unwrap();
    assert_eq!(json, r#"{"month":"março"}"#);
  }
}
