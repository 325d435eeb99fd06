// Timestamp formatting and settlement-day brackets
//
// The API rejects `+00:00` in query timestamps and wants the `Z` suffix, so
// every timestamp that reaches a URL goes through `format_timestamp`.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Half-hourly settlement periods per day.
pub const SETTLEMENT_PERIODS_PER_DAY: u32 = 48;

/// Minutes from midnight to the start of the day's last settlement period.
const LAST_PERIOD_START_MINUTES: i64 = 23 * 60 + 30;

/// Format a timestamp as ISO-8601 with seconds precision.
///
/// A zero offset renders as `Z`. Any other offset renders as `+HH:MM` /
/// `-HH:MM`; the API expects UTC, so callers should convert first.
pub fn format_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A `(from, to)` pair of UTC instants.
///
/// Ordering is not checked here; the server decides what an inverted
/// range means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Period {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }
}

/// Bracket a calendar day by its first and last settlement periods.
///
/// `from` is midnight UTC, `to` is 23:30 UTC (the start of slot 48).
pub fn date_to_periods(date: NaiveDate) -> Period {
    let from = date.and_time(NaiveTime::MIN).and_utc();
    let to = from + TimeDelta::minutes(LAST_PERIOD_START_MINUTES);
    Period { from, to }
}
