//! Backward scheduling of phases from the event date.
//!
//! The last configured phase ends on the anchor date; every earlier phase
//! ends the day before its successor starts. Ranges are always rebuilt from
//! the full plan, never patched in place.

use chrono::{Duration, NaiveDate};

use crate::model::{PhaseConfig, PhaseRange, PhaseSchedule};

/// Compute the date range of every phase in `plan`, anchored on `anchor_date`.
///
/// The result lists phases in the same order as `plan`. Durations are
/// clamped to `1..=MAX_PHASE_DAYS` (see [`PhaseConfig::effective_days`]) and
/// dates saturate at the earliest representable day. An empty plan yields an
/// empty schedule.
pub fn compute_ranges(anchor_date: NaiveDate, plan: &[PhaseConfig]) -> PhaseSchedule {
    let mut backward: Vec<PhaseRange> = Vec::with_capacity(plan.len());
    let mut end = anchor_date;

    for phase in plan.iter().rev() {
        let range = PhaseRange::ending_on(end, phase.days);
        end = range.start.pred_opt().unwrap_or(NaiveDate::MIN);
        backward.push(range);
    }

    let schedule: PhaseSchedule = plan
        .iter()
        .zip(backward.into_iter().rev())
        .map(|(phase, range)| (phase.key.clone(), range))
        .collect();

    tracing::debug!(
        anchor = %anchor_date,
        phases = schedule.len(),
        "computed phase ranges"
    );
    schedule
}

/// Sum of the clamped durations in `plan`.
pub fn total_days(plan: &[PhaseConfig]) -> i64 {
    plan.iter().map(PhaseConfig::effective_days).sum()
}

/// First day of the first phase, or `None` for an empty plan.
pub fn project_start(anchor_date: NaiveDate, plan: &[PhaseConfig]) -> Option<NaiveDate> {
    if plan.is_empty() {
        return None;
    }
    let start = Duration::try_days(total_days(plan) - 1)
        .and_then(|back| anchor_date.checked_sub_signed(back))
        .unwrap_or(NaiveDate::MIN);
    Some(start)
}
