// src/export/csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{get_headers, notify_export_success, row_to_strings, stats_block};
use crate::models::report::{ReportRow, ReportSummary};
use crate::ui::messages::info;
use std::io;
use std::path::Path;

/// CSV export: header, rows, blank line, statistics block.
pub(crate) fn export_csv(
    rows: &[ReportRow],
    summary: &ReportSummary,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV open error: {e}"))))?;

    wtr.write_record(get_headers())
        .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;

    for r in rows {
        wtr.write_record(row_to_strings(r))
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.write_record([""])
        .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;

    for (label, value) in stats_block(summary) {
        wtr.write_record([label, value.as_str()])
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()
        .map_err(|e| AppError::from(io::Error::other(format!("CSV flush error: {e}"))))?;

    notify_export_success("CSV", path);
    Ok(())
}
