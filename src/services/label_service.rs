//! Axis label formatting with day-boundary tracking for intraday series

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::record::SeriesKind;

/// Tracks the last calendar day emitted during one chart build.
///
/// Intraday labels drop the date part while consecutive records share a day
/// and switch back to the full timestamp when the day rolls over. The state
/// lives for a single build; construct a fresh tracker per chart so one
/// request's final day can never bleed into the next request's first label.
#[derive(Debug, Default)]
pub struct DayTracker {
    // None is the sentinel: it compares unequal to every real date, so the
    // first intraday record always gets the full label.
    last_day: Option<NaiveDate>,
}

impl DayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format one record's timestamp as its display label.
    pub fn label(&mut self, timestamp: NaiveDateTime, kind: SeriesKind) -> String {
        if kind != SeriesKind::Intraday {
            return timestamp.format("%Y-%m-%d").to_string();
        }

        if self.last_day == Some(timestamp.date()) {
            timestamp.format("%H:%M:%S").to_string()
        } else {
            self.last_day = Some(timestamp.date());
            timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn intraday_marks_day_boundaries() {
        let mut tracker = DayTracker::new();
        let labels: Vec<String> = [
            "2023-01-01 09:30:00",
            "2023-01-01 09:45:00",
            "2023-01-02 09:30:00",
        ]
        .iter()
        .map(|t| tracker.label(ts(t), SeriesKind::Intraday))
        .collect();

        assert_eq!(
            labels,
            vec!["2023-01-01 09:30:00", "09:45:00", "2023-01-02 09:30:00"]
        );
    }

    #[test]
    fn non_intraday_is_a_plain_date() {
        let mut tracker = DayTracker::new();
        assert_eq!(
            tracker.label(ts("2023-01-01 00:00:00"), SeriesKind::Daily),
            "2023-01-01"
        );
        // Repeating the same day changes nothing; no state is involved.
        assert_eq!(
            tracker.label(ts("2023-01-01 00:00:00"), SeriesKind::Weekly),
            "2023-01-01"
        );
    }

    #[test]
    fn a_fresh_tracker_starts_with_the_full_label() {
        let mut first = DayTracker::new();
        first.label(ts("2023-01-01 09:30:00"), SeriesKind::Intraday);

        // A second build must not inherit the first build's last day.
        let mut second = DayTracker::new();
        assert_eq!(
            second.label(ts("2023-01-01 10:00:00"), SeriesKind::Intraday),
            "2023-01-01 10:00:00"
        );
    }
}
