//! Session aggregator: pure function turning raw registros into per-persona,
//! per-day report rows. No database access, no ambient state.

use crate::models::registro::Registro;
use crate::models::report::{ReportRow, SIN_REGISTRO};
use chrono::{NaiveDate, NaiveTime, Timelike};
use std::collections::BTreeMap;

/// Group events by (persona, fecha), pick the first Entrada and the first
/// Salida of each day, and compute worked hours. Groups are ordered by date
/// ascending, then owner name, then persona id as a deterministic tie-break.
pub fn aggregate(events: &[Registro]) -> Vec<ReportRow> {
    let mut groups: BTreeMap<(NaiveDate, String, i64), Vec<&Registro>> = BTreeMap::new();
    for ev in events {
        groups
            .entry((ev.date, ev.persona.nombre.clone(), ev.persona_id))
            .or_default()
            .push(ev);
    }

    let mut rows = Vec::with_capacity(groups.len());
    for ((fecha, _nombre, _persona_id), mut day) in groups {
        day.sort_by_key(|e| e.time);

        // Only the FIRST event of each kind counts for the hours; later
        // duplicates stay in the raw ledger but are ignored here.
        let entrada = day.iter().find(|e| e.kind.is_entrada());
        let salida = day.iter().find(|e| e.kind.is_salida());

        let horas = worked_hours(entrada.map(|e| e.time), salida.map(|e| e.time));

        let persona = &day[0].persona;
        rows.push(ReportRow {
            fecha,
            matricula: persona.matricula.clone(),
            nombre: persona.nombre_completo(),
            categoria: persona.categoria.clone(),
            hora_entrada: entrada
                .map(|e| e.time_short())
                .unwrap_or_else(|| SIN_REGISTRO.to_string()),
            hora_salida: salida
                .map(|e| e.time_short())
                .unwrap_or_else(|| SIN_REGISTRO.to_string()),
            horas_trabajadas: horas,
        });
    }

    rows
}

/// Worked hours for one day. Zero when either side is missing. A salida
/// earlier than the entrada means the shift crossed midnight while both
/// events were recorded under the same calendar date, so 24h are added
/// before subtracting.
pub fn worked_hours(entrada: Option<NaiveTime>, salida: Option<NaiveTime>) -> f64 {
    let (Some(e), Some(s)) = (entrada, salida) else {
        return 0.0;
    };

    let mut secs =
        i64::from(s.num_seconds_from_midnight()) - i64::from(e.num_seconds_from_midnight());
    if secs < 0 {
        secs += 24 * 3600;
    }

    secs as f64 / 3600.0
}
