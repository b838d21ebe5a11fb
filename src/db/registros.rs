use crate::errors::AppError;
use crate::errors::AppResult;
use crate::models::action::ActionKind;
use crate::models::persona::Persona;
use crate::models::registro::Registro;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Every read joins the owning persona: report and listing paths always need
/// the name/matricula/categoria next to the event.
const SELECT_REGISTRO: &str = "SELECT r.id, r.persona_id, r.kind, r.date, r.time,
            p.nombre, p.apellido, p.matricula, p.categoria, p.ruta_foto
     FROM registros r
     JOIN personas p ON p.id = r.persona_id";

pub fn map_row(row: &Row) -> Result<Registro> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = NaiveTime::parse_from_str(&time_str, "%H:%M:%S").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(time_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = ActionKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidActionKind(kind_str.clone())),
        )
    })?;

    // The join does not carry the huella blob; listing and report paths never
    // touch it.
    let persona = Persona {
        id: row.get("persona_id")?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        matricula: row.get("matricula")?,
        categoria: row.get("categoria")?,
        ruta_foto: row.get("ruta_foto")?,
        huella: None,
    };

    Ok(Registro {
        id: row.get("id")?,
        persona_id: row.get("persona_id")?,
        kind,
        date,
        time,
        persona,
    })
}

pub fn load_all(conn: &Connection) -> AppResult<Vec<Registro>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_REGISTRO} ORDER BY r.date ASC, r.time ASC, r.id ASC"
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_for_persona(conn: &Connection, persona_id: i64) -> AppResult<Vec<Registro>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_REGISTRO}
         WHERE r.persona_id = ?1
         ORDER BY r.date ASC, r.time ASC, r.id ASC"
    ))?;
    let rows = stmt.query_map([persona_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The single registro with the maximum (date, time) for a persona.
/// Tie-break on identical (date, time): highest id wins.
pub fn load_latest_for_persona(conn: &Connection, persona_id: i64) -> AppResult<Option<Registro>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_REGISTRO}
         WHERE r.persona_id = ?1
         ORDER BY r.date DESC, r.time DESC, r.id DESC
         LIMIT 1"
    ))?;
    Ok(stmt.query_row([persona_id], map_row).optional()?)
}

/// Inclusive date-range load, ordered by date, then owner name, then time —
/// the grouping order the aggregator expects. `categoria = None` means no
/// category filter.
pub fn load_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
    categoria: Option<&str>,
) -> AppResult<Vec<Registro>> {
    let start_str = start.format("%Y-%m-%d").to_string();
    let end_str = end.format("%Y-%m-%d").to_string();

    let mut out = Vec::new();
    match categoria {
        None => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_REGISTRO}
                 WHERE r.date BETWEEN ?1 AND ?2
                 ORDER BY r.date ASC, p.nombre ASC, r.time ASC, r.id ASC"
            ))?;
            let rows = stmt.query_map(params![start_str, end_str], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(cat) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_REGISTRO}
                 WHERE r.date BETWEEN ?1 AND ?2 AND p.categoria = ?3
                 ORDER BY r.date ASC, p.nombre ASC, r.time ASC, r.id ASC"
            ))?;
            let rows = stmt.query_map(params![start_str, end_str, cat], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn load_by_id(conn: &Connection, id: i64) -> AppResult<Option<Registro>> {
    let mut stmt = conn.prepare(&format!("{SELECT_REGISTRO} WHERE r.id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert_registro(conn: &Connection, ev: &Registro) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO registros (persona_id, kind, date, time)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            ev.persona_id,
            ev.kind.to_db_str(),
            ev.date.format("%Y-%m-%d").to_string(),
            ev.time.format("%H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Data-correction path only; the check-in flow never mutates a registro.
pub fn update_registro(conn: &Connection, ev: &Registro) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE registros
         SET persona_id = ?1, kind = ?2, date = ?3, time = ?4
         WHERE id = ?5",
        params![
            ev.persona_id,
            ev.kind.to_db_str(),
            ev.date.format("%Y-%m-%d").to_string(),
            ev.time.format("%H:%M:%S").to_string(),
            ev.id,
        ],
    )?;
    Ok(n)
}

pub fn delete_registro(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM registros WHERE id = ?1", [id])?;
    Ok(n)
}
