//! Dashboard aggregates over a project list.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{classifier, progress};
use crate::model::{Project, ProjectStatus};

/// How many projects the "recent" and "next events" lists hold.
pub const DEFAULT_LIST_LEN: usize = 5;
/// Months covered by the creation trend on the reports page.
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total: usize,
    pub planning: usize,
    pub active: usize,
    pub completed: usize,
    pub paused: usize,
    pub cancelled: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub overdue: usize,
    pub upcoming: usize,
    /// Mean time-elapsed progress over all projects.
    pub average_progress: u8,
    /// Sum of all budgets; projects without one count as 0.
    pub total_budget: f64,
}

/// Number of projects created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    /// Abbreviated month name.
    pub label: String,
    pub created: usize,
}

impl ProjectStats {
    pub fn count(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Planning => self.planning,
            ProjectStatus::Active => self.active,
            ProjectStatus::Completed => self.completed,
            ProjectStatus::Paused => self.paused,
            ProjectStatus::Cancelled => self.cancelled,
        }
    }
}

/// Compute every dashboard counter for `projects` as of `now`.
pub fn project_stats(
    projects: &[Project],
    now: NaiveDate,
    week_start: Weekday,
    upcoming_days: i64,
) -> ProjectStats {
    let mut stats = ProjectStats {
        total: projects.len(),
        this_week: classifier::this_week(projects, now, week_start).len(),
        this_month: classifier::this_month(projects, now).len(),
        overdue: classifier::overdue(projects, now).len(),
        upcoming: classifier::upcoming(projects, now, upcoming_days).len(),
        average_progress: progress::average_progress(projects.iter().map(|p| &p.phases), now),
        total_budget: projects.iter().filter_map(|p| p.budget).sum(),
        ..Default::default()
    };

    for p in projects {
        match p.status {
            ProjectStatus::Planning => stats.planning += 1,
            ProjectStatus::Active => stats.active += 1,
            ProjectStatus::Completed => stats.completed += 1,
            ProjectStatus::Paused => stats.paused += 1,
            ProjectStatus::Cancelled => stats.cancelled += 1,
        }
    }

    stats
}

/// The `limit` most recently created projects, newest first.
pub fn recent_projects(projects: &[Project], limit: usize) -> Vec<&Project> {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// The next `limit` upcoming events, soonest first.
pub fn next_events(projects: &[Project], now: NaiveDate, upcoming_days: i64, limit: usize) -> Vec<&Project> {
    let mut sorted = classifier::upcoming(projects, now, upcoming_days);
    sorted.sort_by_key(|p| p.anchor_date);
    sorted.truncate(limit);
    sorted
}

/// Projects created per month for the `months` months ending with the month
/// of `now`, oldest first.
pub fn monthly_trend(projects: &[Project], now: NaiveDate, months: usize) -> Vec<MonthCount> {
    let current = i64::from(now.year()) * 12 + i64::from(now.month0());
    let mut trend: Vec<MonthCount> = (0..months)
        .map_while(|back| month_start(current - back as i64))
        .map(|first| {
            let created = projects
                .iter()
                .filter(|p| {
                    let day = p.created_at.date_naive();
                    day.year() == first.year() && day.month() == first.month()
                })
                .count();
            MonthCount {
                year: first.year(),
                month: first.month(),
                label: first.format("%b").to_string(),
                created,
            }
        })
        .collect();
    trend.reverse();
    trend
}

// First day of the month numbered `index` months since year 0.
fn month_start(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(year, index.rem_euclid(12) as u32 + 1, 1)
}

/// Projects whose name, client or description contains `query` (ignoring
/// case), optionally limited to one `status`. An empty query matches all.
pub fn search<'a>(projects: &'a [Project], query: &str, status: Option<ProjectStatus>) -> Vec<&'a Project> {
    let needle = query.trim().to_lowercase();
    let matches = |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(&needle));

    projects
        .iter()
        .filter(|p| status.map_or(true, |s| p.status == s))
        .filter(|p| {
            needle.is_empty()
                || matches(Some(p.name.as_str()))
                || matches(p.client.as_deref())
                || matches(p.description.as_deref())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classifier::DEFAULT_UPCOMING_DAYS;
    use crate::model::PhaseConfig;
    use chrono::{Duration, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn projects() -> Vec<Project> {
        let plan = [
            PhaseConfig::new("prep", "Prep", 10),
            PhaseConfig::new("event", "Event", 1),
        ];
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let specs = [
            ("a", date(2024, 5, 10), ProjectStatus::Active),
            ("b", date(2024, 5, 10), ProjectStatus::Completed),
            ("c", date(2024, 5, 17), ProjectStatus::Planning),
            ("d", date(2024, 6, 1), ProjectStatus::Paused),
            ("e", date(2024, 5, 20), ProjectStatus::Cancelled),
            ("f", date(2024, 5, 25), ProjectStatus::Active),
        ];
        specs
            .iter()
            .enumerate()
            .map(|(i, (name, anchor, status))| {
                let mut p = Project::new(*name, *anchor, &plan, base + Duration::days(i as i64));
                p.status = *status;
                p
            })
            .collect()
    }

    #[test]
    fn dashboard_counters() {
        let list = projects();
        let now = date(2024, 5, 15);
        let stats = project_stats(&list, now, Weekday::Sun, DEFAULT_UPCOMING_DAYS);

        assert_eq!(stats.total, 6);
        assert_eq!(stats.count(ProjectStatus::Active), 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.planning, 1);
        assert_eq!(stats.paused, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.this_week, 1);
        assert_eq!(stats.this_month, 5);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.upcoming, 4);
        // a, b: 100; c: 80; d: 0; e: 50; f: 0
        assert_eq!(stats.average_progress, 55);
        assert_eq!(stats.total_budget, 0.0);
    }

    #[test]
    fn budgets_are_summed() {
        let mut list = projects();
        list[0].budget = Some(1_000.0);
        list[3].budget = Some(250.5);
        let stats = project_stats(&list, date(2024, 5, 15), Weekday::Sun, DEFAULT_UPCOMING_DAYS);
        assert_eq!(stats.total_budget, 1_250.5);
    }

    #[test]
    fn creation_trend_covers_trailing_months() {
        let mut list = projects();
        list[0].created_at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap();
        list[1].created_at = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();
        list[2].created_at = Utc.with_ymd_and_hms(2024, 5, 14, 8, 0, 0).unwrap();
        list[3].created_at = Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap();

        let trend = monthly_trend(&list, date(2024, 5, 15), DEFAULT_TREND_MONTHS);
        let months: Vec<(i32, u32, usize)> = trend.iter().map(|m| (m.year, m.month, m.created)).collect();
        assert_eq!(
            months,
            [(2023, 12, 1), (2024, 1, 2), (2024, 2, 0), (2024, 3, 1), (2024, 4, 0), (2024, 5, 1)]
        );
        assert_eq!(trend[0].label, "Dec");
        assert!(monthly_trend(&list, date(2024, 5, 15), 0).is_empty());
    }

    #[test]
    fn search_matches_text_fields_and_status() {
        let mut list = projects();
        list[0].name = "Black Friday".into();
        list[1].client = Some("Acme Corp".into());
        list[2].description = Some("Webinar series for ACME partners".into());

        let names = |found: Vec<&Project>| found.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(search(&list, "acme", None)), ["b", "c"]);
        assert_eq!(names(search(&list, "  FRIDAY ", None)), ["Black Friday"]);
        assert_eq!(names(search(&list, "acme", Some(ProjectStatus::Planning))), ["c"]);
        assert_eq!(search(&list, "", None).len(), 6);
        assert_eq!(names(search(&list, "", Some(ProjectStatus::Active))), ["Black Friday", "f"]);
        assert!(search(&list, "nothing like this", None).is_empty());
    }

    #[test]
    fn empty_dashboard() {
        let stats = project_stats(&[], date(2024, 5, 15), Weekday::Sun, DEFAULT_UPCOMING_DAYS);
        assert_eq!(stats, ProjectStats::default());
    }

    #[test]
    fn recent_and_next_lists() {
        let list = projects();
        let recent: Vec<&str> = recent_projects(&list, 3).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(recent, ["f", "e", "d"]);

        let next: Vec<&str> = next_events(&list, date(2024, 5, 15), DEFAULT_UPCOMING_DAYS, 2)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(next, ["c", "e"]);
    }
}
