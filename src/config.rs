//! Engine settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::engine::classifier::{DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS};
use crate::engine::layout::{
    DEFAULT_LABEL_STRIDE, DEFAULT_MIN_WIDTH_PERCENT, DEFAULT_PADDING_DAYS, MAX_PADDING_DAYS,
};
use crate::error::{PlanError, Result};

/// Tunables for classification and layout. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First day of the "this week" bucket.
    pub week_start: Weekday,
    /// How far ahead "upcoming" looks, in days.
    pub upcoming_days: i64,
    /// Days added on both sides of a chart's covering span.
    pub padding_days: i64,
    /// Narrowest bar a phase may be drawn with.
    pub min_width_percent: f32,
    /// Month name on every n-th day of the axis.
    pub label_stride: usize,
    /// Template preselected for new launches.
    pub active_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            padding_days: DEFAULT_PADDING_DAYS,
            min_width_percent: DEFAULT_MIN_WIDTH_PERCENT,
            label_stride: DEFAULT_LABEL_STRIDE,
            active_template: crate::templates::DEFAULT_TEMPLATE.into(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or unreadable. Out-of-range numbers are clamped.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str::<Self>(&contents) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }
        }
    }

    /// Pull hand-edited values back into the ranges the engine works with.
    pub fn clamped(mut self) -> Self {
        self.upcoming_days = self.upcoming_days.clamp(0, MAX_UPCOMING_DAYS);
        self.padding_days = self.padding_days.clamp(0, MAX_PADDING_DAYS);
        self.min_width_percent = self.min_width_percent.clamp(0.0, 100.0);
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Locations of the settings file and user template folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub templates_dir: PathBuf,
    pub settings_path: PathBuf,
}

impl ConfigPaths {
    /// Paths under a given config root.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            templates_dir: root.join("templates"),
            settings_path: root.join("settings.json"),
        }
    }

    /// Paths under the platform config directory.
    pub fn discover() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "launch-timeline").ok_or(PlanError::NoConfigDir)?;
        Ok(Self::under(dirs.config_dir()))
    }
}
