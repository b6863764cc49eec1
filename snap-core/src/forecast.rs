//! Reduction of the 3-hour forecast series to one reading per day.

use chrono::{NaiveTime, Timelike};

use crate::model::ForecastReading;

pub const MAX_FORECAST_DAYS: usize = 5;

fn is_noon(time: NaiveTime) -> bool {
    time.hour() == 12 && time.minute() == 0 && time.second() == 0
}

/// Picks the 12:00 reading of each day, oldest first, at most
/// [`MAX_FORECAST_DAYS`] of them.
///
/// A day with no 12:00 reading is left out rather than filled in from its
/// neighbours. Applying this to its own output returns the same list.
pub fn select_daily(readings: &[ForecastReading]) -> Vec<ForecastReading> {
    let mut noon: Vec<&ForecastReading> = readings.iter().filter(|r| is_noon(r.at.time())).collect();
    noon.sort_by_key(|r| r.at);
    noon.dedup_by_key(|r| r.at.date());

    noon.into_iter().take(MAX_FORECAST_DAYS).cloned().collect()
}
