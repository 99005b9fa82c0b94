use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Raw date material found on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    /// ISO 8601 or human-readable text such as `"Feb 12, 2026"`.
    Text(&'a str),
    /// Seconds since the Unix epoch.
    EpochSeconds(i64),
}

impl<'a> DateInput<'a> {
    /// A bare run of digits is read as epoch seconds, anything else as text.
    pub fn from_raw(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(secs) = trimmed.parse() {
                return DateInput::EpochSeconds(secs);
            }
        }
        DateInput::Text(trimmed)
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

enum Parsed {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

fn parse(input: DateInput<'_>) -> Option<Parsed> {
    match input {
        DateInput::EpochSeconds(secs) => Utc.timestamp_opt(secs, 0).single().map(Parsed::Instant),
        DateInput::Text(text) => parse_text(text.trim()),
    }
}

fn parse_text(text: &str) -> Option<Parsed> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Parsed::Instant(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(Parsed::Instant(dt.with_timezone(&Utc)));
    }

    // Without an offset the wall-clock date is already local.
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| Parsed::Day(dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(Parsed::Day)
        })
}

/// Render a date as `DD/MM` in the local timezone.
///
/// Returns `None` for absent or unparsable input.
pub fn to_canonical_day_month(input: Option<DateInput<'_>>) -> Option<String> {
    to_day_month_in(input, &Local)
}

/// [`to_canonical_day_month`] against an explicit timezone.
pub fn to_day_month_in<Tz: TimeZone>(input: Option<DateInput<'_>>, tz: &Tz) -> Option<String> {
    let (day, month) = match parse(input?)? {
        Parsed::Instant(instant) => {
            let local = instant.with_timezone(tz);
            (local.day(), local.month())
        }
        Parsed::Day(date) => (date.day(), date.month()),
    };
    Some(format!("{:02}/{:02}", day, month))
}
