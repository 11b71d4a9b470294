// Older clients report a clock range instead of a total.
//
// Rule
// - total hours = whole minutes between the two times divided by 60, rounded to 2 decimals half up.

use chrono::NaiveTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Returns `None` unless `to` is strictly after `from`.
pub fn hours_between(from: NaiveTime, to: NaiveTime) -> Option<Decimal> {
    let minutes = (to - from).num_minutes();
    if minutes <= 0 {
        return None;
    }
    let hours = Decimal::from(minutes) / Decimal::from(60);
    Some(hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
