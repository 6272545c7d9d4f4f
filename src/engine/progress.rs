//! Linear time-elapsed progress of a schedule.

use chrono::NaiveDate;

use crate::model::PhaseSchedule;

/// Percentage of the schedule elapsed at `now`, in `[0, 100]`.
///
/// Measured from the earliest phase start to the latest phase end and
/// rounded to the nearest whole percent (halves round up). An empty
/// schedule is 0%. A single-day schedule is 100% once `now` reaches it.
pub fn progress(phases: &PhaseSchedule, now: NaiveDate) -> u8 {
    let (Some(start), Some(end)) = (phases.start(), phases.end()) else {
        return 0;
    };
    if now < start {
        return 0;
    }
    if now >= end {
        return 100;
    }

    let elapsed = (now - start).num_days();
    let total = (end - start).num_days();
    // round(100 * elapsed / total) without going through floats
    let percent = (200 * elapsed + total) / (2 * total);
    percent.clamp(0, 100) as u8
}

/// Key of the phase running on `now`, if any.
pub fn current_phase(phases: &PhaseSchedule, now: NaiveDate) -> Option<&str> {
    phases
        .iter()
        .find(|p| p.range.contains(now))
        .map(|p| p.key.as_str())
}

/// Mean progress across several schedules, rounded; 0 when there are none.
pub fn average_progress<'a, I>(schedules: I, now: NaiveDate) -> u8
where
    I: IntoIterator<Item = &'a PhaseSchedule>,
{
    let (sum, count) = schedules
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| {
            (sum + u32::from(progress(s, now)), count + 1)
        });
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)) as u8
}
