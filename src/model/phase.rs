use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::color::PhaseColor;
use crate::error::PlanError;

/// Longest phase the scheduler will place, in days (about 100 years).
/// Longer requests are shortened to this.
pub const MAX_PHASE_DAYS: i64 = 36_500;

/// One configured phase: a key, a display name, and a length in whole days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub key: String,
    pub name: String,
    /// Requested length. Scheduling clamps it to `1..=MAX_PHASE_DAYS`.
    pub days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<PhaseColor>,
}

impl PhaseConfig {
    pub fn new(key: impl Into<String>, name: impl Into<String>, days: i64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            days,
            color: None,
        }
    }

    pub fn with_color(mut self, color: PhaseColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Duration used for scheduling, between one day and [`MAX_PHASE_DAYS`].
    pub fn effective_days(&self) -> i64 {
        self.days.clamp(1, MAX_PHASE_DAYS)
    }

    /// Configured colour, or the palette colour for this key.
    pub fn display_color(&self) -> PhaseColor {
        self.color.unwrap_or_else(|| PhaseColor::for_key(&self.key))
    }
}

/// Inclusive date range `[start, end]` of a scheduled phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct PhaseRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Unchecked wire form; deserialization goes through [`PhaseRange::new`].
#[derive(Deserialize)]
struct RawRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawRange> for PhaseRange {
    type Error = PlanError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl PhaseRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if end < start {
            return Err(PlanError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range of `days` whole days ending on `end`. `days` is clamped to
    /// `1..=MAX_PHASE_DAYS`; the start saturates at the earliest
    /// representable date.
    pub fn ending_on(end: NaiveDate, days: i64) -> Self {
        let back = Duration::days(days.clamp(1, MAX_PHASE_DAYS) - 1);
        let start = end.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Inclusive length in days; a single-day phase is 1.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Phase ranges in configured order.
///
/// Order is the chronological phase order of the plan; it is kept as an
/// explicit sequence and never derived from a map's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseSchedule {
    entries: Vec<ScheduledPhase>,
}

/// A phase key paired with its computed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPhase {
    pub key: String,
    #[serde(flatten)]
    pub range: PhaseRange,
}

impl PhaseSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase at the end of the sequence.
    pub fn push(&mut self, key: impl Into<String>, range: PhaseRange) {
        self.entries.push(ScheduledPhase {
            key: key.into(),
            range,
        });
    }

    pub fn get(&self, key: &str) -> Option<&PhaseRange> {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map(|p| &p.range)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledPhase> {
        self.entries.iter()
    }

    pub fn ranges(&self) -> impl Iterator<Item = &PhaseRange> {
        self.entries.iter().map(|p| &p.range)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest start across all phases.
    pub fn start(&self) -> Option<NaiveDate> {
        self.ranges().map(|r| r.start).min()
    }

    /// Latest end across all phases.
    pub fn end(&self) -> Option<NaiveDate> {
        self.ranges().map(|r| r.end).max()
    }

    /// Phases sorted by start date, for listings.
    pub fn sorted_by_start(&self) -> Vec<&ScheduledPhase> {
        let mut sorted: Vec<&ScheduledPhase> = self.entries.iter().collect();
        sorted.sort_by_key(|p| p.range.start);
        sorted
    }
}

impl<'a> IntoIterator for &'a PhaseSchedule {
    type Item = &'a ScheduledPhase;
    type IntoIter = std::slice::Iter<'a, ScheduledPhase>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, PhaseRange)> for PhaseSchedule {
    fn from_iter<I: IntoIterator<Item = (String, PhaseRange)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, range)| ScheduledPhase { key, range })
            .collect();
        Self { entries }
    }
}
