//! Report generation: range validation, ledger fetch, aggregation and the
//! summary statistics shown next to every report.

use crate::core::aggregate::aggregate;
use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::models::report::{ReportRow, ReportSummary, round2};
use crate::utils::date::days_inclusive;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct ReportLogic;

impl ReportLogic {
    /// Build the aggregated rows and summary for an inclusive date range,
    /// optionally filtered by category. The range is validated before any
    /// query runs.
    pub fn generate(
        pool: &mut DbPool,
        start: NaiveDate,
        end: NaiveDate,
        categoria: Option<&str>,
    ) -> AppResult<(Vec<ReportRow>, ReportSummary)> {
        Self::validate_range(start, end)?;

        let events = Ledger::events_in_range(pool, start, end, categoria)?;
        let rows = aggregate(&events);
        let summary = Self::summarize(&rows, start, end);
        Ok((rows, summary))
    }

    pub fn validate_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
        if start > end {
            return Err(AppError::InvalidRange(format!(
                "La fecha de inicio no puede ser mayor a la fecha fin ({start} > {end})"
            )));
        }
        Ok(())
    }

    /// Totals over the generated rows. The average divides the already
    /// rounded total by the inclusive day count of the range.
    pub fn summarize(rows: &[ReportRow], start: NaiveDate, end: NaiveDate) -> ReportSummary {
        let total_horas = round2(rows.iter().map(|r| r.horas_trabajadas).sum());

        let unicas: HashSet<&str> = rows.iter().map(|r| r.matricula.as_str()).collect();

        let dias = days_inclusive(start, end);
        let promedio = if dias > 0 {
            round2(total_horas / dias as f64)
        } else {
            0.0
        };

        ReportSummary {
            total_registros: rows.len(),
            personas_unicas: unicas.len(),
            total_horas,
            promedio_horas_por_dia: promedio,
        }
    }

    /// Render a generated report to a file in `dir`. The filename is
    /// timestamped (`Reporte_Asistencia_<yyyyMMdd_HHmmss>.<ext>`) to avoid
    /// collisions between consecutive exports.
    pub fn export(
        rows: &[ReportRow],
        summary: &ReportSummary,
        dir: &Path,
        format: ExportFormat,
    ) -> AppResult<PathBuf> {
        if rows.is_empty() {
            return Err(AppError::EmptyReport);
        }

        std::fs::create_dir_all(dir)?;
        let path = dir.join(export::timestamped_file_name(format.extension()));

        match format {
            ExportFormat::Xlsx => export::xlsx::export_xlsx(rows, summary, &path)?,
            ExportFormat::Csv => export::csv::export_csv(rows, summary, &path)?,
            ExportFormat::Json => export::json::export_json(rows, summary, &path)?,
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::ReportRow;

    fn row(matricula: &str, fecha: &str, horas: f64) -> ReportRow {
        ReportRow {
            fecha: NaiveDate::parse_from_str(fecha, "%Y-%m-%d").unwrap(),
            matricula: matricula.to_string(),
            nombre: "Ana Test".to_string(),
            categoria: "Asesor".to_string(),
            hora_entrada: "08:00".to_string(),
            hora_salida: "17:00".to_string(),
            horas_trabajadas: horas,
        }
    }

    #[test]
    fn summary_totals_and_average_over_inclusive_days() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

        let rows = vec![
            row("A100", "2025-09-01", 9.5),
            row("B200", "2025-09-02", 8.0),
            row("A100", "2025-09-03", 0.0),
        ];

        let s = ReportLogic::summarize(&rows, start, end);
        assert_eq!(s.total_registros, 3);
        assert_eq!(s.personas_unicas, 2);
        assert_eq!(s.total_horas, 17.5);
        assert_eq!(s.promedio_horas_por_dia, 5.83);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let err = ReportLogic::validate_range(start, end).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange(_)));
    }

    #[test]
    fn export_refuses_empty_report() {
        let summary = ReportSummary::default();
        let err = ReportLogic::export(
            &[],
            &summary,
            Path::new("/tmp"),
            ExportFormat::Csv,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::EmptyReport));
    }
}
