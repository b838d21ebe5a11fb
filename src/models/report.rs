use chrono::NaiveDate;
use serde::Serialize;

/// Sentinel shown when a day has no Entrada or no Salida.
pub const SIN_REGISTRO: &str = "Sin registro";

/// One aggregated (persona, fecha) row of a report. Ephemeral: recomputed on
/// every generation, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub fecha: NaiveDate,
    pub matricula: String,
    pub nombre: String,
    pub categoria: String,
    pub hora_entrada: String,   // "HH:MM" or SIN_REGISTRO
    pub hora_salida: String,    // "HH:MM" or SIN_REGISTRO
    pub horas_trabajadas: f64,  // unrounded; rounding happens at summary level
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ReportSummary {
    pub total_registros: usize,
    pub personas_unicas: usize,
    pub total_horas: f64,
    pub promedio_horas_por_dia: f64,
}

/// Round to 2 decimals, the precision used by all summary figures.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
