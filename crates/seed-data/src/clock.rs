//! Run-relative time helpers.

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Local calendar day containing the run instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// Local midnight of the run date.
    pub start: DateTime<Utc>,
    /// `start` plus 24 hours.
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Returns the window for the local day of `now`, in `now`'s time zone.
    ///
    /// When midnight falls in a DST gap the first valid hour after it is used.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let date = now.date_naive();

        let start = (0..24)
            .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
            .find_map(|time| tz.from_local_datetime(&date.and_time(time)).earliest())
            .map(|start| start.with_timezone(&Utc))
            // Every zone has some valid hour on every date.
            .unwrap_or_else(|| date.and_time(NaiveTime::default()).and_utc());

        Self {
            start,
            end: start + Duration::hours(24),
        }
    }

    /// Instant `hours` after the start of the day.
    pub fn at_hour(&self, hours: i64) -> DateTime<Utc> {
        self.start + Duration::hours(hours)
    }
}

/// Formats a timestamp the way documents store it: UTC, milliseconds, `Z`.
pub fn iso8601<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
