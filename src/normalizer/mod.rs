//! Normalization of raw page values into typed result fields.

mod count;
mod date;

pub use count::{parse_abbreviated_count, try_parse_count};
pub use date::{to_canonical_day_month, to_day_month_in, DateInput};
