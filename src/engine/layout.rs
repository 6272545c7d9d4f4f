//! Maps phase ranges onto a normalized 0–100 timeline.
//!
//! Positions are percentages of a [`TimelineSpan`], so the presentation
//! layer can place bars without knowing its pixel width. All functions are
//! pure in their inputs; calling them twice with the same span yields the
//! same bars and labels.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{PhaseSchedule, TimelineScale, TimelineSpan};

/// Narrowest bar width, so one-day phases stay visible on long spans.
pub const DEFAULT_MIN_WIDTH_PERCENT: f32 = 1.0;
/// Days of breathing room added on each side of a covering span.
pub const DEFAULT_PADDING_DAYS: i64 = 5;
/// Largest padding accepted from settings.
pub const MAX_PADDING_DAYS: i64 = 365;
/// Every n-th day header also carries the month name.
pub const DEFAULT_LABEL_STRIDE: usize = 5;

/// Horizontal placement of one phase bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBar {
    pub key: String,
    pub left_percent: f32,
    pub width_percent: f32,
}

/// One column of the day axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub date: NaiveDate,
    /// Day of month, zero padded.
    pub day: String,
    /// Abbreviated month name on stride columns.
    pub month: Option<String>,
}

/// A gridline on a coarser header scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTick {
    pub date: NaiveDate,
    pub left_percent: f32,
    pub label: String,
    /// Month/year caption shown above the tick, when this tick opens a month.
    pub caption: Option<String>,
}

/// A phase start placed along the project's own duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseMarker {
    pub key: String,
    pub date: NaiveDate,
    pub position_percent: f32,
}

/// Place every phase of `phases` within `span`.
///
/// Bars keep the schedule's order. Widths never drop below
/// `min_width_percent`. A span without any days (only possible when built
/// by hand with `end < start`) pins every bar at 0 with the minimum width.
pub fn layout(phases: &PhaseSchedule, span: &TimelineSpan, min_width_percent: f32) -> Vec<PhaseBar> {
    let total = span.total_days();
    phases
        .iter()
        .map(|p| {
            let (left_percent, width) = if total <= 0 {
                (0.0, 0.0)
            } else {
                (
                    span.date_to_percent(p.range.start),
                    100.0 * p.range.days() as f32 / total as f32,
                )
            };
            PhaseBar {
                key: p.key.clone(),
                left_percent,
                width_percent: width.max(min_width_percent),
            }
        })
        .collect()
}

/// The padded span covering every phase of every schedule given.
pub fn covering_span<'a, I>(schedules: I, padding_days: i64) -> Option<TimelineSpan>
where
    I: IntoIterator<Item = &'a PhaseSchedule>,
{
    TimelineSpan::covering(schedules.into_iter().flat_map(|s| s.ranges()), padding_days)
}

/// One label per day of `span`; every `stride`-th day (starting with the
/// first) also carries the month. A stride of 0 disables month labels.
pub fn axis_labels(span: &TimelineSpan, stride: usize) -> Vec<AxisLabel> {
    (0..span.total_days())
        .map(|i| {
            let date = span.start + Duration::days(i);
            let month = (stride > 0 && i as usize % stride == 0)
                .then(|| date.format("%b").to_string());
            AxisLabel {
                date,
                day: date.format("%d").to_string(),
                month,
            }
        })
        .collect()
}

/// Header gridlines for the given `scale`.
///
/// Weeks start on the Monday on or before the span start; months start on
/// the first of the span's first month.
pub fn scale_ticks(span: &TimelineSpan, scale: TimelineScale) -> Vec<ScaleTick> {
    let mut ticks = Vec::new();
    let mut date = span.start;

    match scale {
        TimelineScale::Days => {
            while date <= span.end {
                let caption = (date.day() == 1).then(|| date.format("%b %Y").to_string());
                ticks.push(tick(span, date, date.format("%d").to_string(), caption));
                match date.succ_opt() {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
        TimelineScale::Weeks => {
            let weekday = date.weekday().num_days_from_monday();
            date = date
                .checked_sub_signed(Duration::days(i64::from(weekday)))
                .unwrap_or(date);

            while date <= span.end {
                let caption = (date.day() <= 7).then(|| date.format("%b %Y").to_string());
                ticks.push(tick(span, date, date.format("W%V").to_string(), caption));
                match date.checked_add_signed(Duration::days(7)) {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
        TimelineScale::Months => {
            date = date.with_day(1).unwrap_or(date);

            while date <= span.end {
                ticks.push(tick(span, date, date.format("%b %Y").to_string(), None));

                let (y, m) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                match NaiveDate::from_ymd_opt(y, m, 1) {
                    Some(next) => date = next,
                    None => break,
                }
            }
        }
    }

    ticks
}

fn tick(span: &TimelineSpan, date: NaiveDate, label: String, caption: Option<String>) -> ScaleTick {
    ScaleTick {
        date,
        left_percent: span.date_to_percent(date),
        label,
        caption,
    }
}

/// Phase starts positioned between the project's first start (0) and last
/// end (100), sorted by date and clamped to that range.
pub fn phase_markers(phases: &PhaseSchedule) -> Vec<PhaseMarker> {
    let (Some(start), Some(end)) = (phases.start(), phases.end()) else {
        return Vec::new();
    };
    let total = (end - start).num_days();

    phases
        .sorted_by_start()
        .into_iter()
        .map(|p| {
            let position = if total == 0 {
                0.0
            } else {
                100.0 * (p.range.start - start).num_days() as f32 / total as f32
            };
            PhaseMarker {
                key: p.key.clone(),
                date: p.range.start,
                position_percent: position.clamp(0.0, 100.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scheduler::compute_ranges;
    use crate::model::{PhaseConfig, PhaseRange};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(pairs: &[(&str, NaiveDate, NaiveDate)]) -> PhaseSchedule {
        pairs
            .iter()
            .map(|(k, s, e)| (k.to_string(), PhaseRange::new(*s, *e).unwrap()))
            .collect()
    }

    #[test]
    fn bars_are_percentages_of_span() {
        let phases = schedule(&[
            ("prep", date(2024, 1, 1), date(2024, 1, 10)),
            ("event", date(2024, 1, 11), date(2024, 1, 20)),
        ]);
        let span = TimelineSpan::new(date(2024, 1, 1), date(2024, 1, 20)).unwrap();
        let bars = layout(&phases, &span, DEFAULT_MIN_WIDTH_PERCENT);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].key, "prep");
        assert_eq!(bars[0].left_percent, 0.0);
        assert_eq!(bars[0].width_percent, 50.0);
        assert_eq!(bars[1].left_percent, 50.0);
        assert_eq!(bars[1].width_percent, 50.0);
    }

    #[test]
    fn short_phases_get_minimum_width() {
        let phases = schedule(&[("event", date(2024, 6, 1), date(2024, 6, 1))]);
        let span = TimelineSpan::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let bars = layout(&phases, &span, DEFAULT_MIN_WIDTH_PERCENT);
        assert_eq!(bars[0].width_percent, 1.0);
    }

    #[test]
    fn inverted_span_yields_finite_bars() {
        let phases = schedule(&[("event", date(2024, 1, 1), date(2024, 1, 3))]);
        let span = TimelineSpan { start: date(2024, 1, 2), end: date(2024, 1, 1) };
        let bars = layout(&phases, &span, DEFAULT_MIN_WIDTH_PERCENT);
        assert_eq!(bars[0].left_percent, 0.0);
        assert_eq!(bars[0].width_percent, DEFAULT_MIN_WIDTH_PERCENT);
        assert!(bars.iter().all(|b| b.left_percent.is_finite() && b.width_percent.is_finite()));
    }

    #[test]
    fn covering_span_pads_all_projects() {
        let a = compute_ranges(date(2024, 3, 31), &[PhaseConfig::new("x", "X", 10)]);
        let b = compute_ranges(date(2024, 4, 15), &[PhaseConfig::new("y", "Y", 3)]);
        let span = covering_span([&a, &b], DEFAULT_PADDING_DAYS).unwrap();
        assert_eq!(span.start, date(2024, 3, 17));
        assert_eq!(span.end, date(2024, 4, 20));
        assert!(covering_span(std::iter::empty(), 5).is_none());
    }

    #[test]
    fn axis_has_one_label_per_day_with_month_stride() {
        let span = TimelineSpan::new(date(2024, 1, 29), date(2024, 2, 9)).unwrap();
        let labels = axis_labels(&span, DEFAULT_LABEL_STRIDE);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0].day, "29");
        assert_eq!(labels[0].month.as_deref(), Some("Jan"));
        assert_eq!(labels[5].date, date(2024, 2, 3));
        assert_eq!(labels[5].month.as_deref(), Some("Feb"));
        assert_eq!(labels[10].month.as_deref(), Some("Feb"));
        assert!(labels[1].month.is_none());
        assert_eq!(axis_labels(&span, DEFAULT_LABEL_STRIDE), labels);
    }

    #[test]
    fn week_ticks_start_on_monday() {
        // 2024-05-15 is a Wednesday
        let span = TimelineSpan::new(date(2024, 5, 15), date(2024, 6, 10)).unwrap();
        let ticks = scale_ticks(&span, TimelineScale::Weeks);
        assert_eq!(ticks[0].date, date(2024, 5, 13));
        assert_eq!(ticks[0].label, "W20");
        assert!(ticks[0].left_percent < 0.0);
        assert!(ticks[0].caption.is_none());
        let june = ticks.iter().find(|t| t.date == date(2024, 6, 3)).unwrap();
        assert_eq!(june.caption.as_deref(), Some("Jun 2024"));
    }

    #[test]
    fn month_ticks_cross_year_end() {
        let span = TimelineSpan::new(date(2023, 11, 20), date(2024, 2, 1)).unwrap();
        let labels: Vec<String> = scale_ticks(&span, TimelineScale::Months)
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(labels, ["Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]);
    }

    #[test]
    fn ticks_stop_at_end_of_calendar() {
        let span = TimelineSpan::new(NaiveDate::MAX - Duration::days(20), NaiveDate::MAX).unwrap();
        assert_eq!(scale_ticks(&span, TimelineScale::Days).len(), 21);
        assert!(!scale_ticks(&span, TimelineScale::Weeks).is_empty());
        assert_eq!(scale_ticks(&span, TimelineScale::Months).len(), 1);
    }

    #[test]
    fn day_ticks_caption_month_starts() {
        let span = TimelineSpan::new(date(2024, 2, 28), date(2024, 3, 2)).unwrap();
        let ticks = scale_ticks(&span, TimelineScale::Days);
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[2].caption.as_deref(), Some("Mar 2024"));
    }

    #[test]
    fn markers_span_project_duration() {
        let phases = schedule(&[
            ("late", date(2024, 1, 6), date(2024, 1, 11)),
            ("early", date(2024, 1, 1), date(2024, 1, 5)),
        ]);
        let markers = phase_markers(&phases);
        assert_eq!(markers[0].key, "early");
        assert_eq!(markers[0].position_percent, 0.0);
        assert_eq!(markers[1].position_percent, 50.0);

        let single = schedule(&[("event", date(2024, 1, 1), date(2024, 1, 1))]);
        assert_eq!(phase_markers(&single)[0].position_percent, 0.0);
        assert!(phase_markers(&PhaseSchedule::new()).is_empty());
    }
}
