// src/export/model.rs

use crate::models::report::{ReportRow, ReportSummary};
use crate::utils::formatting::{fmt_fecha, fmt_horas};

/// Header per CSV / XLSX, in sheet order.
pub fn get_headers() -> Vec<&'static str> {
    vec![
        "Fecha",
        "Matrícula",
        "Nombre",
        "Tipo",
        "Entrada",
        "Salida",
        "Horas Trabajadas",
    ]
}

/// One report row as display strings (date dd/mm/yyyy, hours 2 decimals).
pub fn row_to_strings(r: &ReportRow) -> Vec<String> {
    vec![
        fmt_fecha(r.fecha),
        r.matricula.clone(),
        r.nombre.clone(),
        r.categoria.clone(),
        r.hora_entrada.clone(),
        r.hora_salida.clone(),
        fmt_horas(r.horas_trabajadas),
    ]
}

/// The labelled statistics block appended below the rows.
pub fn stats_block(s: &ReportSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Total Registros:", s.total_registros.to_string()),
        ("Personas Únicas:", s.personas_unicas.to_string()),
        ("Total Horas:", fmt_horas(s.total_horas)),
        (
            "Promedio Horas/Día:",
            fmt_horas(s.promedio_horas_por_dia),
        ),
    ]
}
