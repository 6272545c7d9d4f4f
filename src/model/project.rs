use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::{PhaseConfig, PhaseSchedule};
use crate::engine::scheduler;

/// Lifecycle state of a launch project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    Paused,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Paused,
        ProjectStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// A launch anchored to its event date, with derived phase ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// The event date. The last phase always ends on this day.
    pub anchor_date: NaiveDate,
    pub phases: PhaseSchedule,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Planned spend, in the caller's currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Names of the people working on the launch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Project {
    /// Create a project in the planning state with ranges computed from `plan`.
    pub fn new(
        name: impl Into<String>,
        anchor_date: NaiveDate,
        plan: &[PhaseConfig],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            anchor_date,
            phases: scheduler::compute_ranges(anchor_date, plan),
            status: ProjectStatus::Planning,
            created_at,
            client: None,
            description: None,
            priority: None,
            budget: None,
            team: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Recompute every phase range from `plan` and the current anchor date.
    pub fn reschedule(&mut self, plan: &[PhaseConfig]) {
        self.phases = scheduler::compute_ranges(self.anchor_date, plan);
    }

    /// Move the event date and recompute all ranges against it.
    pub fn set_anchor_date(&mut self, anchor_date: NaiveDate, plan: &[PhaseConfig]) {
        self.anchor_date = anchor_date;
        self.reschedule(plan);
    }

    pub fn is_completed(&self) -> bool {
        self.status == ProjectStatus::Completed
    }
}
