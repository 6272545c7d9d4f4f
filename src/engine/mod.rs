//! Scheduling and timeline metrics.
//!
//! Pure functions only: nothing here reads the clock, touches the
//! filesystem, or keeps state between calls. Callers pass `now`.

pub mod classifier;
pub mod layout;
pub mod progress;
pub mod scheduler;
pub mod stats;

pub use classifier::{month_window, overdue, this_month, this_week, upcoming, week_window};
pub use layout::{
    axis_labels, covering_span, layout, phase_markers, scale_ticks, AxisLabel, PhaseBar, PhaseMarker,
    ScaleTick,
};
pub use progress::{average_progress, current_phase, progress};
pub use scheduler::compute_ranges;
pub use stats::{
    monthly_trend, next_events, project_stats, recent_projects, search, MonthCount, ProjectStats,
};
