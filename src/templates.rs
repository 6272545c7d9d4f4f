//! Template catalog: built-in phase plans plus user plans from disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigPaths, Settings};
use crate::error::Result;
use crate::io::file;
use crate::model::{PhaseColor, PhaseConfig};

/// Name of the built-in plan used when nothing else is selected.
pub const DEFAULT_TEMPLATE: &str = "Standard Launch";

/// A named, reusable ordered list of phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub phases: Vec<PhaseConfig>,
}

/// Manages all available templates and the active selection.
pub struct TemplateManager {
    /// Built-ins first, then user templates in file-name order.
    templates: Vec<PhaseTemplate>,
    /// Index into `templates` for the currently active template.
    active_index: usize,
    paths: ConfigPaths,
}

impl TemplateManager {
    /// Load built-in and user templates from `paths`, restoring the active
    /// template saved in the settings file.
    pub fn new(paths: ConfigPaths) -> Self {
        let settings = Settings::load(&paths.settings_path);

        let mut templates = builtin_templates();
        merge_user_templates(&mut templates, &paths.templates_dir);

        let active_index = templates
            .iter()
            .position(|t| t.name == settings.active_template)
            .unwrap_or(0);

        Self {
            templates,
            active_index,
            paths,
        }
    }

    /// Catalog backed by the platform config directory.
    pub fn from_config_dir() -> Result<Self> {
        Ok(Self::new(ConfigPaths::discover()?))
    }

    // ── Getters ─────────────────────────────────────────────────

    /// The currently active template.
    pub fn active(&self) -> &PhaseTemplate {
        &self.templates[self.active_index]
    }

    /// List of (index, name) for all templates.
    pub fn list(&self) -> Vec<(usize, String)> {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.name.clone()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&PhaseTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn templates_dir(&self) -> &Path {
        &self.paths.templates_dir
    }

    // ── Switching ───────────────────────────────────────────────

    /// Switch to a template by name and persist the choice.
    pub fn set_active_by_name(&mut self, name: &str) -> Result<bool> {
        let Some(idx) = self.templates.iter().position(|t| t.name == name) else {
            return Ok(false);
        };
        self.active_index = idx;
        let mut settings = Settings::load(&self.paths.settings_path);
        settings.active_template = name.to_string();
        settings.save(&self.paths.settings_path)?;
        Ok(true)
    }

    // ── Editing ─────────────────────────────────────────────────

    /// Write `template` to the user folder and add or replace it in the
    /// catalog. Built-in names cannot be overwritten; returns `false` then.
    pub fn save_user_template(&mut self, template: PhaseTemplate) -> Result<bool> {
        if builtin_templates().iter().any(|t| t.name == template.name) {
            return Ok(false);
        }
        std::fs::create_dir_all(&self.paths.templates_dir)?;
        file::save_template(&template, &self.template_path(&template.name))?;

        match self.templates.iter().position(|t| t.name == template.name) {
            Some(idx) => self.templates[idx] = template,
            None => self.templates.push(template),
        }
        Ok(true)
    }

    /// Reload user templates from disk (e.g. after the user edits a JSON file).
    pub fn reload_user_templates(&mut self) {
        let active_name = self.active().name.clone();

        self.templates = builtin_templates();
        merge_user_templates(&mut self.templates, &self.paths.templates_dir);

        self.active_index = self
            .templates
            .iter()
            .position(|t| t.name == active_name)
            .unwrap_or(0);
    }

    fn template_path(&self, name: &str) -> PathBuf {
        let stem = crate::io::csv_import::slug(name);
        let stem = if stem.is_empty() { "template".to_string() } else { stem };
        self.paths.templates_dir.join(format!("{}.json", stem))
    }
}

fn merge_user_templates(templates: &mut Vec<PhaseTemplate>, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();

    for path in paths {
        match file::load_template(&path) {
            Ok(template) => {
                // Built-ins and earlier files win on name collisions
                if templates.iter().any(|t| t.name == template.name) {
                    tracing::warn!(path = %path.display(), name = %template.name, "duplicate template name");
                } else {
                    templates.push(template);
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load template");
            }
        }
    }
}

// ─── Built-in templates ─────────────────────────────────────────────────────

pub fn builtin_templates() -> Vec<PhaseTemplate> {
    vec![
        standard_launch(),
        product_launch(),
        online_event(),
        marketing_campaign(),
    ]
}

fn phase(key: &str, name: &str, days: i64) -> PhaseConfig {
    PhaseConfig::new(key, name, days).with_color(PhaseColor::for_key(key))
}

/// The full eight-phase launch plan.
fn standard_launch() -> PhaseTemplate {
    PhaseTemplate {
        name: DEFAULT_TEMPLATE.into(),
        description: "Default phases for a launch campaign".into(),
        phases: vec![
            phase("planning", "Planning", 30),
            phase("acquisition", "Acquisition", 21),
            phase("warmup", "Warm-up", 7),
            phase("event", "Event", 3),
            phase("open_cart", "Open Cart", 7),
            phase("recovery", "Recovery", 14),
            phase("downsell", "Downsell", 7),
            phase("debriefing", "Debriefing", 7),
        ],
    }
}

fn product_launch() -> PhaseTemplate {
    PhaseTemplate {
        name: "Product Launch".into(),
        description: "Standard template for launching digital products".into(),
        phases: vec![
            phase("planning", "Strategic Planning", 45),
            phase("pre_launch", "Pre-launch", 30),
            phase("warmup", "Warm-up", 14),
            phase("launch", "Launch", 7),
            phase("post_launch", "Post-launch", 14),
        ],
    }
}

fn online_event() -> PhaseTemplate {
    PhaseTemplate {
        name: "Online Event".into(),
        description: "Webinars and virtual events".into(),
        phases: vec![
            phase("planning", "Planning", 21),
            phase("promotion", "Promotion", 14),
            phase("warmup", "Warm-up", 7),
            phase("event", "Event", 1),
            phase("follow_up", "Follow-up", 7),
        ],
    }
}

fn marketing_campaign() -> PhaseTemplate {
    PhaseTemplate {
        name: "Marketing Campaign".into(),
        description: "Advertising campaigns".into(),
        phases: vec![
            phase("research", "Research & Analysis", 14),
            phase("creation", "Content Creation", 21),
            phase("testing", "A/B Testing", 7),
            phase("launch", "Launch", 30),
            phase("optimization", "Optimization", 14),
        ],
    }
}
