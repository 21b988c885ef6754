// JSON report export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nameqa_audit::model::AuditResult;

use crate::error::ReportError;

/// Write the full audit result as pretty-printed JSON.
pub fn export(result: &AuditResult, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(path = %path.display(), checks = result.checks.len(), "wrote JSON report");
    Ok(())
}
