use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;

use crate::view::pad2;

/// Time left until the event, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Parse an RFC 3339 event time such as `2026-03-28T18:30:00+07:00`.
pub fn parse_event_time(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
}

impl Countdown {
    /// Remaining time from `now` to `event`; all zero once the event started.
    pub fn at(event: DateTime<FixedOffset>, now: DateTime<Utc>) -> Self {
        let diff_ms = event.timestamp_millis() - now.timestamp_millis();
        if diff_ms <= 0 {
            return Self::default();
        }

        let total = diff_ms / 1000;
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn is_over(&self) -> bool {
        *self == Self::default()
    }

    /// Days, hours, minutes, seconds, each padded to two digits.
    pub fn padded(&self) -> [String; 4] {
        [
            pad2(self.days),
            pad2(self.hours),
            pad2(self.minutes),
            pad2(self.seconds),
        ]
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.padded();
        write!(f, "{d} hari {h} jam {m} menit {s} detik")
    }
}
