use std::path::Path;

use crate::error::Result;
use crate::templates::PhaseTemplate;

/// Save a template to a JSON file.
pub fn save_template(template: &PhaseTemplate, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(template)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a template from a JSON file.
pub fn load_template(path: &Path) -> Result<PhaseTemplate> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
