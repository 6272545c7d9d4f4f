//! Time-window filters over a project list.
//!
//! Every filter takes `now` explicitly and returns a new list of borrowed
//! projects in input order. A project whose event is exactly `now` is
//! "today": neither overdue nor upcoming.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::model::{Project, TimeWindow};

/// Default look-ahead for [`upcoming`].
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;
/// Largest look-ahead accepted from settings.
pub const MAX_UPCOMING_DAYS: i64 = 3_650;

/// The week containing `now`, starting on `week_start`.
pub fn week_window(now: NaiveDate, week_start: Weekday) -> TimeWindow {
    let back = (7 + now.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let from = now
        .checked_sub_signed(Duration::days(i64::from(back)))
        .unwrap_or(NaiveDate::MIN);
    TimeWindow {
        from,
        to: from.checked_add_signed(Duration::days(6)).unwrap_or(NaiveDate::MAX),
    }
}

/// The calendar month containing `now`.
pub fn month_window(now: NaiveDate) -> TimeWindow {
    let from = now.with_day(1).unwrap_or(now);
    let (y, m) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let to = NaiveDate::from_ymd_opt(y, m, 1)
        .map(|next| next - Duration::days(1))
        .unwrap_or(now);
    TimeWindow { from, to }
}

/// Projects whose event falls in the week containing `now`.
pub fn this_week(projects: &[Project], now: NaiveDate, week_start: Weekday) -> Vec<&Project> {
    let window = week_window(now, week_start);
    in_window(projects, window)
}

/// Projects whose event falls in the month containing `now`.
pub fn this_month(projects: &[Project], now: NaiveDate) -> Vec<&Project> {
    in_window(projects, month_window(now))
}

/// Projects whose event has passed and which were never completed.
pub fn overdue(projects: &[Project], now: NaiveDate) -> Vec<&Project> {
    projects
        .iter()
        .filter(|p| p.anchor_date < now && !p.is_completed())
        .collect()
}

/// Projects whose event is after `now` and before `now + horizon_days`.
///
/// A horizon of zero or less selects nothing; one past the end of the
/// calendar reaches its last day.
pub fn upcoming(projects: &[Project], now: NaiveDate, horizon_days: i64) -> Vec<&Project> {
    if horizon_days <= 0 {
        return Vec::new();
    }
    let horizon = Duration::try_days(horizon_days)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(NaiveDate::MAX);
    projects
        .iter()
        .filter(|p| p.anchor_date > now && p.anchor_date < horizon)
        .collect()
}

fn in_window(projects: &[Project], window: TimeWindow) -> Vec<&Project> {
    projects
        .iter()
        .filter(|p| window.contains(p.anchor_date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PhaseConfig, ProjectStatus};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project(name: &str, anchor: NaiveDate, status: ProjectStatus) -> Project {
        let plan = [PhaseConfig::new("event", "Event", 1)];
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut p = Project::new(name, anchor, &plan, created);
        p.status = status;
        p
    }

    fn names(projects: Vec<&Project>) -> Vec<&str> {
        projects.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn week_window_respects_start_day() {
        // 2024-05-15 is a Wednesday
        let now = date(2024, 5, 15);
        let sunday = week_window(now, Weekday::Sun);
        assert_eq!(sunday.from, date(2024, 5, 12));
        assert_eq!(sunday.to, date(2024, 5, 18));
        let monday = week_window(now, Weekday::Mon);
        assert_eq!(monday.from, date(2024, 5, 13));
        assert_eq!(monday.to, date(2024, 5, 19));
        let on_start = week_window(date(2024, 5, 13), Weekday::Mon);
        assert_eq!(on_start.from, date(2024, 5, 13));
    }

    #[test]
    fn month_window_handles_leap_february_and_december() {
        let feb = month_window(date(2024, 2, 10));
        assert_eq!(feb.from, date(2024, 2, 1));
        assert_eq!(feb.to, date(2024, 2, 29));
        let dec = month_window(date(2023, 12, 31));
        assert_eq!(dec.from, date(2023, 12, 1));
        assert_eq!(dec.to, date(2023, 12, 31));
    }

    #[test]
    fn weekly_and_monthly_buckets() {
        let now = date(2024, 5, 15);
        let projects = vec![
            project("sat", date(2024, 5, 18), ProjectStatus::Active),
            project("sun-next", date(2024, 5, 19), ProjectStatus::Active),
            project("month-end", date(2024, 5, 31), ProjectStatus::Planning),
            project("june", date(2024, 6, 1), ProjectStatus::Planning),
        ];
        assert_eq!(names(this_week(&projects, now, Weekday::Sun)), ["sat"]);
        assert_eq!(names(this_week(&projects, now, Weekday::Mon)), ["sat", "sun-next"]);
        assert_eq!(
            names(this_month(&projects, now)),
            ["sat", "sun-next", "month-end"]
        );
    }

    #[test]
    fn completed_projects_are_never_overdue() {
        let now = date(2024, 5, 15);
        let projects = vec![
            project("late", date(2024, 5, 1), ProjectStatus::Active),
            project("done", date(2024, 5, 1), ProjectStatus::Completed),
            project("paused", date(2023, 1, 1), ProjectStatus::Paused),
        ];
        assert_eq!(names(overdue(&projects, now)), ["late", "paused"]);
    }

    #[test]
    fn upcoming_excludes_today_and_horizon() {
        let now = date(2024, 5, 15);
        let projects = vec![
            project("today", now, ProjectStatus::Active),
            project("tomorrow", date(2024, 5, 16), ProjectStatus::Active),
            project("day-29", date(2024, 6, 13), ProjectStatus::Active),
            project("day-30", date(2024, 6, 14), ProjectStatus::Active),
        ];
        assert_eq!(
            names(upcoming(&projects, now, DEFAULT_UPCOMING_DAYS)),
            ["tomorrow", "day-29"]
        );
        assert!(overdue(&projects, now).is_empty());
    }

    #[test]
    fn upcoming_honours_custom_horizon() {
        let now = date(2024, 5, 15);
        let projects = vec![
            project("tomorrow", date(2024, 5, 16), ProjectStatus::Active),
            project("day-7", date(2024, 5, 22), ProjectStatus::Active),
            project("next-year", date(2025, 5, 1), ProjectStatus::Active),
        ];
        assert_eq!(names(upcoming(&projects, now, 7)), ["tomorrow"]);
        assert_eq!(names(upcoming(&projects, now, 8)), ["tomorrow", "day-7"]);
        assert!(upcoming(&projects, now, 0).is_empty());
        assert!(upcoming(&projects, now, -30).is_empty());
    }

    #[test]
    fn oversized_horizon_reaches_end_of_calendar() {
        let now = date(2024, 6, 10);
        let projects = vec![
            project("next-year", date(2025, 5, 1), ProjectStatus::Active),
            project("past", date(2024, 1, 1), ProjectStatus::Active),
        ];
        assert!(upcoming(&[], now, 200_000_000_000_000).is_empty());
        assert_eq!(names(upcoming(&projects, now, i64::MAX)), ["next-year"]);
        assert_eq!(names(upcoming(&projects, NaiveDate::MAX, 5)), Vec::<&str>::new());
    }

    #[test]
    fn windows_at_calendar_edges_do_not_overflow() {
        let last = week_window(NaiveDate::MAX, Weekday::Sun);
        assert_eq!(last.to, NaiveDate::MAX);
        let first = week_window(NaiveDate::MIN, Weekday::Sun);
        assert!(first.contains(NaiveDate::MIN));
    }
}
