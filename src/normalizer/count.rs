use std::sync::LazyLock;

use regex::Regex;

/// First run of digits (optionally with a decimal part) and an optional
/// magnitude letter right after it.
static COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?|\.[0-9]+)([KkMmBb])?").expect("count pattern is valid")
});

/// Dot-grouped thousands (`45.231`, `1.234.567`) and whatever follows the
/// last group, so a trailing digit or magnitude letter can rule it out.
static DOTTED_THOUSANDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,3}(?:\.[0-9]{3})+)([0-9.KkMmBb])?").expect("dotted pattern is valid")
});

/// Parse a human count such as `"1.2M"`, `"45,231"` or `"12K seguidores"`.
///
/// Returns 0 for absent, empty or unmatchable input.
pub fn parse_abbreviated_count(raw: Option<&str>) -> u64 {
    raw.and_then(try_parse_count).unwrap_or(0)
}

/// Like [`parse_abbreviated_count`], but tells "no number here" apart
/// from a real zero so fallback chains can move on.
pub fn try_parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let caps = COUNT_PATTERN.captures(&cleaned)?;
    let number = caps.get(1)?;

    if let Some(grouped) = dotted_thousands(&cleaned, number.start()) {
        return grouped.parse().ok();
    }
    let number = number.as_str();

    let multiplier: u64 = match caps.get(2).map(|m| m.as_str()) {
        Some("K" | "k") => 1_000,
        Some("M" | "m") => 1_000_000,
        Some("B" | "b") => 1_000_000_000,
        _ => 1,
    };

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut value = whole.checked_mul(multiplier)?;

    // Integer arithmetic keeps "1.2M" exact; digits past the multiplier's
    // precision are truncated.
    let mut scale = multiplier;
    for digit in fraction.bytes() {
        scale /= 10;
        if scale == 0 {
            break;
        }
        value = value.checked_add(u64::from(digit - b'0') * scale)?;
    }

    Some(value)
}

/// `45.231` with no magnitude letter is a locale thousands separator, not a
/// decimal point.
fn dotted_thousands(text: &str, start: usize) -> Option<String> {
    let caps = DOTTED_THOUSANDS.captures(text)?;
    let groups = caps.get(1)?;
    if groups.start() != start || caps.get(2).is_some() {
        return None;
    }
    Some(groups.as_str().replace('.', ""))
}
