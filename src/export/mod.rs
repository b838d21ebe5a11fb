// src/export/mod.rs

pub mod csv;
pub mod json;
mod model;
pub mod xlsx;

pub use model::{get_headers, row_to_strings, stats_block};

use crate::ui::messages::success;
use chrono::Local;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for all export formats.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Collision-free export file name, stamped with the current wall clock.
pub fn timestamped_file_name(ext: &str) -> String {
    format!(
        "Reporte_Asistencia_{}.{ext}",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
