//! Phase scheduling and timeline metrics for launch campaigns.
//!
//! A launch is a sequence of phases that ends on a fixed event date. This
//! crate derives each phase's dates from its duration, sorts projects into
//! time buckets, measures elapsed progress, and lays phases out on a
//! normalized Gantt timeline.
//!
//! # Modules
//!
//! - **`model`**: `PhaseConfig`, `PhaseRange`, `PhaseSchedule`, `Project`,
//!   `TimelineSpan`, `TimeWindow`
//! - **`engine`**: the pure computations (scheduler, progress, classifier,
//!   layout, dashboard stats). Every function takes `now` as an argument.
//! - **`validation`**: integrity checks for schedules loaded from storage
//! - **`templates`**, **`config`**, **`io`**: phase plan presets, settings,
//!   and JSON/CSV loading
//!
//! Storing projects, rendering charts, and reading the clock are left to
//! the caller.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod templates;
pub mod validation;

pub use config::{ConfigPaths, Settings};
pub use error::PlanError;
pub use model::{PhaseConfig, PhaseRange, PhaseSchedule, Project, ProjectStatus, TimeWindow, TimelineSpan};
pub use templates::{PhaseTemplate, TemplateManager};
