// src/export/json.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::report::{ReportRow, ReportSummary};
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    reportes: &'a [ReportRow],
    resumen: &'a ReportSummary,
}

/// JSON export, pretty-printed: rows plus the summary object.
pub(crate) fn export_json(
    rows: &[ReportRow],
    summary: &ReportSummary,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let payload = JsonReport {
        reportes: rows,
        resumen: summary,
    };

    let json_data = serde_json::to_string_pretty(&payload)
        .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}
