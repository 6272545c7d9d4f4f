pub mod color;
pub mod phase;
pub mod project;
pub mod timeline;

pub use color::PhaseColor;
pub use phase::{PhaseConfig, PhaseRange, PhaseSchedule, ScheduledPhase};
pub use project::{Priority, Project, ProjectStatus};
pub use timeline::{TimeWindow, TimelineScale, TimelineSpan};
