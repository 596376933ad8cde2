use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Boarding closes a fixed 45 minutes before departure.
pub const BOARDING_OFFSET_MINUTES: i64 = 45;

pub fn boarding_time(departure: DateTime<Utc>) -> DateTime<Utc> {
    departure - Duration::minutes(BOARDING_OFFSET_MINUTES)
}

/// Elapsed time between departure and arrival as `"{h}h {m}m"`, both parts
/// floored. Arrival before departure is not rejected.
pub fn flight_duration(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> String {
    const HOUR_MS: i64 = 60 * 60 * 1000;
    const MINUTE_MS: i64 = 60 * 1000;

    let diff_ms = (arrival - departure).num_milliseconds();
    let hours = diff_ms.div_euclid(HOUR_MS);
    let minutes = (diff_ms % HOUR_MS).div_euclid(MINUTE_MS);
    format!("{}h {}m", hours, minutes)
}

// Half-cents round up, not to even
pub fn format_price(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

// "10:00 AM"
pub fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%I:%M %p").to_string()
}

// "Sun, Mar 1"
pub fn format_day(at: DateTime<Utc>) -> String {
    at.format("%a, %b %-d").to_string()
}

/// Premium over the base fare as a whole percentage, only for modifiers above 1.
pub fn premium_percent(price_modifier: Decimal) -> Option<String> {
    if price_modifier > Decimal::ONE {
        let percent = ((price_modifier - Decimal::ONE) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Some(format!("+{}% premium", percent.normalize()))
    } else {
        None
    }
}
