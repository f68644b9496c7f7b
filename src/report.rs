//! Render command results as text.

use crate::drift::DriftRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::time::SystemTime;

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format an optional mtime as UTC RFC3339, or `missing` for an absent path.
pub fn format_mod_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => {
            DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Secs, true)
        }
        None => "missing".to_string(),
    }
}

/// Format the drift audit result as a table of drifted skills.
pub fn format_drift_report(records: &[DriftRecord]) -> String {
    if records.is_empty() {
        return "No drifting skills found".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Drifting skills")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Skill", "Repo", "Project", "Status"]);
    for record in records {
        table.add_row(vec![
            record.skill.clone(),
            format_mod_time(record.repo_time),
            format_mod_time(record.project_time),
            record.status.to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
