//! `nameqa checks` - list the check catalog.

use serde::Serialize;

use nameqa_audit::{CheckId, CheckKind};

use crate::CliError;

#[derive(Serialize)]
struct CheckEntry {
    id: CheckId,
    label: &'static str,
    kind: &'static str,
    columns: Vec<&'static str>,
    description: &'static str,
}

fn kind_name(id: CheckId) -> &'static str {
    match id.kind() {
        CheckKind::Group(_) => "group",
        CheckKind::Record(_) => "record",
    }
}

pub fn cmd_checks(json: bool) -> Result<(), CliError> {
    if json {
        let entries: Vec<CheckEntry> = CheckId::all()
            .into_iter()
            .map(|id| CheckEntry {
                id,
                label: id.label(),
                kind: kind_name(id),
                columns: id.columns(),
                description: id.description(),
            })
            .collect();
        let out = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    for id in CheckId::all() {
        println!("{:<20} {:<7} {}", id.as_str(), kind_name(id), id.label());
    }
    Ok(())
}
