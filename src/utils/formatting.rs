//! Formatting utilities used for CLI and export outputs.

use chrono::NaiveDate;

/// Report date format, dd/mm/yyyy.
pub fn fmt_fecha(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// Worked hours, 2 decimals.
pub fn fmt_horas(h: f64) -> String {
    format!("{h:.2}")
}
