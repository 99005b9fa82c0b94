//! Page-title parsing shared by title-based strategies.

/// Cut `title` at the earliest marker and trim separators.
///
/// Returns `None` when nothing is left or only a bare brand name remains,
/// which is what login walls and error pages show.
pub fn cut_title(title: &str, markers: &[&str], brands: &[&str]) -> Option<String> {
    let title = strip_notification_count(title.trim());
    let end = markers
        .iter()
        .filter_map(|marker| title.find(marker))
        .min()
        .unwrap_or(title.len());

    let name = title[..end]
        .trim()
        .trim_matches(['|', '-', '•', '·', ':'])
        .trim();

    if name.is_empty() || brands.iter().any(|brand| name.eq_ignore_ascii_case(brand)) {
        None
    } else {
        Some(name.to_string())
    }
}

/// Drop a leading unread badge such as `(3) ` or `(20+) `.
fn strip_notification_count(title: &str) -> &str {
    let Some(rest) = title.strip_prefix('(') else {
        return title;
    };
    match rest.split_once(") ") {
        Some((badge, remainder))
            if !badge.is_empty() && badge.chars().all(|c| c.is_ascii_digit() || c == '+') =>
        {
            remainder.trim_start()
        }
        _ => title,
    }
}
