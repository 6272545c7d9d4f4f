use std::path::Path;

use crate::error::{PlanError, Result};
use crate::model::phase::MAX_PHASE_DAYS;
use crate::model::{PhaseColor, PhaseConfig};

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Key,
    Name,
    Days,
    Color,
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "key" | "id" | "slug" | "phasekey" => Some(Column::Key),

        "name" | "phase" | "phasename" | "label" | "title" | "stage" => Some(Column::Name),

        "days" | "duration" | "durationdays" | "length" | "lengthdays" => Some(Column::Days),

        "color" | "colour" => Some(Column::Color),

        _ => None,
    }
}

/// Derive a phase key from a display name: lowercase ASCII words joined by `_`.
pub fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Import an ordered phase plan from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches headers
/// flexibly ("Phase Name", "Duration Days", ...). Rows keep file order.
/// Durations above [`MAX_PHASE_DAYS`] are skipped like unparsable ones.
/// Returns `(phases, skipped_count)` on success.
pub fn import_phase_plan(path: &Path) -> Result<(Vec<PhaseConfig>, usize)> {
    let content = std::fs::read_to_string(path)?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has = |c: Column| col_map.contains(&Some(c));
    if !has(Column::Name) || !has(Column::Days) {
        return Err(PlanError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut phases: Vec<PhaseConfig> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let mut key_val = None;
        let mut name_val = None;
        let mut days_val = None;
        let mut color_val = None;

        for (field, col) in record.iter().zip(&col_map) {
            match col {
                Some(Column::Key) => key_val = Some(field),
                Some(Column::Name) => name_val = Some(field),
                Some(Column::Days) => days_val = Some(field),
                Some(Column::Color) => color_val = Some(field),
                None => {}
            }
        }

        let name = match name_val {
            Some(n) if !n.is_empty() => n,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let days = match days_val.and_then(|d| d.parse::<i64>().ok()) {
            Some(d) if d <= MAX_PHASE_DAYS => d,
            _ => {
                tracing::warn!(row, value = days_val.unwrap_or(""), "skipping row with invalid duration");
                skipped += 1;
                continue;
            }
        };

        let key = key_val
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| slug(name));
        if key.is_empty() || phases.iter().any(|p| p.key == key) {
            tracing::warn!(row, key = %key, "skipping row with missing or duplicate key");
            skipped += 1;
            continue;
        }

        let mut phase = PhaseConfig::new(key, name, days);
        if let Some(c) = color_val.filter(|c| !c.is_empty()) {
            match c.parse::<PhaseColor>() {
                Ok(color) => phase.color = Some(color),
                Err(e) => tracing::warn!(row, error = %e, "ignoring colour"),
            }
        }
        phases.push(phase);
    }

    if phases.is_empty() {
        return Err(PlanError::NoValidRows {
            path: path.to_path_buf(),
            skipped,
        });
    }

    Ok((phases, skipped))
}
