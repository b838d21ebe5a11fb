// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::{get_headers, notify_export_success, row_to_strings, stats_block};
use crate::models::report::{ReportRow, ReportSummary};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook};
use std::io;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Styled XLSX export: header, one row per ReportRow, statistics block.
pub(crate) fn export_xlsx(
    rows: &[ReportRow],
    summary: &ReportSummary,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Reporte de Asistencia")
        .map_err(to_io_app_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_io_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, r) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        let text_fmt = Format::new()
            .set_background_color(band_color)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        let values = row_to_strings(r);
        let last = values.len() - 1;

        for (col, value) in values.iter().enumerate() {
            // Horas as a real number with a 0.00 format; everything else as text.
            if col == last {
                let num_fmt = Format::new()
                    .set_num_format("0.00")
                    .set_align(FormatAlign::Right)
                    .set_background_color(band_color)
                    .set_pattern(FormatPattern::Solid)
                    .set_border(FormatBorder::Thin);
                worksheet
                    .write_with_format(row, col as u16, r.horas_trabajadas, &num_fmt)
                    .map_err(to_io_app_error)?;
            } else {
                worksheet
                    .write_with_format(row, col as u16, value.as_str(), &text_fmt)
                    .map_err(to_io_app_error)?;
            }

            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    // ---------------------------
    // Statistics block
    // ---------------------------
    let bold = Format::new().set_bold();
    let stats_row = (rows.len() + 3) as u32;

    worksheet
        .write_with_format(stats_row, 0, "ESTADÍSTICAS", &bold)
        .map_err(to_io_app_error)?;

    for (i, (label, value)) in stats_block(summary).iter().enumerate() {
        let row = stats_row + 1 + i as u32;
        worksheet.write(row, 0, *label).map_err(to_io_app_error)?;
        worksheet
            .write(row, 1, value.as_str())
            .map_err(to_io_app_error)?;
    }

    // ---------------------------
    // Set column widths
    // ---------------------------
    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_io_app_error)?;
    }

    workbook.save(path_str(path)?).map_err(to_io_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::from(io::Error::other("invalid path")))
}
