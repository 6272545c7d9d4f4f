use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::phase::PhaseRange;
use crate::error::PlanError;

/// Controls what scale the timeline header displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineScale {
    Days,
    Weeks,
    Months,
}

/// Inclusive calendar window `[from, to]` used for bucket tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TimeWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// The visible date range of a chart, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct TimelineSpan {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date.
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawSpan> for TimelineSpan {
    type Error = PlanError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimelineSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if end < start {
            return Err(PlanError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Union of `ranges`, widened by `padding_days` on both sides.
    ///
    /// Negative padding counts as none, and the padded ends saturate at the
    /// limits of the calendar. Returns `None` when there is nothing to cover.
    pub fn covering<'a, I>(ranges: I, padding_days: i64) -> Option<Self>
    where
        I: IntoIterator<Item = &'a PhaseRange>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for r in ranges {
            bounds = Some(match bounds {
                None => (r.start, r.end),
                Some((lo, hi)) => (lo.min(r.start), hi.max(r.end)),
            });
        }
        let (lo, hi) = bounds?;
        let pad = Duration::try_days(padding_days.max(0));
        Some(Self {
            start: pad.and_then(|p| lo.checked_sub_signed(p)).unwrap_or(NaiveDate::MIN),
            end: pad.and_then(|p| hi.checked_add_signed(p)).unwrap_or(NaiveDate::MAX),
        })
    }

    /// Number of days shown, counting both ends.
    ///
    /// At least 1 for spans built by [`TimelineSpan::new`], [`covering`] or
    /// deserialization; only a hand-assembled inverted span goes lower.
    ///
    /// [`covering`]: TimelineSpan::covering
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Offset of `date` from the span start as a percentage of the span.
    /// An inverted span has no width and maps every date to 0.
    pub fn date_to_percent(&self, date: NaiveDate) -> f32 {
        let total = self.total_days();
        if total <= 0 {
            return 0.0;
        }
        let days = (date - self.start).num_days() as f32;
        100.0 * days / total as f32
    }
}
