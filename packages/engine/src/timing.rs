//! Relative-time classification of events.

use chrono::{Duration, NaiveDateTime};
use scs_conecta_district_models::{Event, HighlightLevel};
use scs_conecta_engine_models::TimeStatus;

/// Classifies `event` relative to the calendar date of `now`.
///
/// A featured (`high` highlight) event dated today or earlier counts as in
/// progress regardless of its start and end times. Use [`is_active_at`] for
/// real start/end containment.
#[must_use]
pub fn classify(event: &Event, now: NaiveDateTime) -> TimeStatus {
    let today = now.date();

    if event.date <= today && event.highlight == HighlightLevel::High {
        return TimeStatus::InProgress;
    }

    let days = (event.date - today).num_days();
    match days {
        0 => TimeStatus::Today,
        d if d > 0 => TimeStatus::Future {
            days: u32::try_from(d).unwrap_or(u32::MAX),
        },
        d => TimeStatus::Past {
            days: u32::try_from(-d).unwrap_or(u32::MAX),
        },
    }
}

/// Start and end instants of `event`. An end time earlier than the start
/// time falls on the following day.
#[must_use]
pub fn event_span(event: &Event) -> (NaiveDateTime, NaiveDateTime) {
    let start = event.date.and_time(event.start_time.to_naive());
    let mut end = event.date.and_time(event.end_time.to_naive());
    if event.end_time < event.start_time {
        end += Duration::days(1);
    }
    (start, end)
}

/// Whether `event` is running at `now` (start inclusive, end exclusive).
#[must_use]
pub fn is_active_at(event: &Event, now: NaiveDateTime) -> bool {
    let (start, end) = event_span(event);
    start <= now && now < end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::{datetime, event};

    #[test]
    fn featured_event_on_or_before_today_is_in_progress() {
        let now = datetime("2025-12-20T09:00:00");
        let mut featured = event("evt-1", "scs-1", "2025-12-20", "19:00", "23:00");
        featured.highlight = HighlightLevel::High;
        assert_eq!(classify(&featured, now), TimeStatus::InProgress);

        featured.date = now.date() - Duration::days(3);
        assert_eq!(classify(&featured, now), TimeStatus::InProgress);
    }

    #[test]
    fn featured_future_event_is_not_in_progress() {
        let now = datetime("2025-12-20T09:00:00");
        let mut featured = event("evt-1", "scs-1", "2025-12-21", "19:00", "23:00");
        featured.highlight = HighlightLevel::High;
        let status = classify(&featured, now);
        assert_eq!(status, TimeStatus::Future { days: 1 });
        assert_eq!(status.label(), "Tomorrow");
    }

    #[test]
    fn classifies_by_calendar_date_only() {
        let now = datetime("2025-12-20T23:59:00");
        let today = event("evt-1", "scs-1", "2025-12-20", "08:00", "09:00");
        assert_eq!(classify(&today, now), TimeStatus::Today);

        let later = event("evt-2", "scs-1", "2025-12-25", "08:00", "09:00");
        assert_eq!(classify(&later, now).label(), "In 5 days");

        let yesterday = event("evt-3", "scs-1", "2025-12-19", "08:00", "09:00");
        assert_eq!(classify(&yesterday, now).label(), "Yesterday");

        let old = event("evt-4", "scs-1", "2025-12-10", "08:00", "09:00");
        assert_eq!(classify(&old, now), TimeStatus::Past { days: 10 });
    }

    #[test]
    fn active_window_is_start_inclusive_end_exclusive() {
        let show = event("evt-1", "scs-1", "2025-12-20", "19:00", "23:00");
        assert!(!is_active_at(&show, datetime("2025-12-20T18:59:00")));
        assert!(is_active_at(&show, datetime("2025-12-20T19:00:00")));
        assert!(!is_active_at(&show, datetime("2025-12-20T23:00:00")));
        assert!(!is_active_at(&show, datetime("2025-12-21T20:00:00")));
    }

    #[test]
    fn overnight_event_is_active_after_midnight() {
        let party = event("evt-1", "scs-1", "2025-12-20", "20:00", "02:00");
        assert!(is_active_at(&party, datetime("2025-12-21T01:00:00")));
        assert!(!is_active_at(&party, datetime("2025-12-21T02:00:00")));
        assert!(!is_active_at(&party, datetime("2025-12-20T01:00:00")));
    }
}
