use crate::errors::AppResult;
use crate::models::persona::Persona;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_PERSONA: &str =
    "SELECT id, nombre, apellido, matricula, categoria, ruta_foto, huella FROM personas";

pub fn map_row(row: &Row) -> Result<Persona> {
    Ok(Persona {
        id: row.get("id")?,
        nombre: row.get("nombre")?,
        apellido: row.get("apellido")?,
        matricula: row.get("matricula")?,
        categoria: row.get("categoria")?,
        ruta_foto: row.get("ruta_foto")?,
        huella: row.get("huella")?,
    })
}

pub fn list_personas(conn: &Connection) -> AppResult<Vec<Persona>> {
    let mut stmt = conn.prepare(&format!("{SELECT_PERSONA} ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Persona>> {
    let mut stmt = conn.prepare(&format!("{SELECT_PERSONA} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn find_by_matricula(conn: &Connection, matricula: &str) -> AppResult<Option<Persona>> {
    let mut stmt = conn.prepare(&format!("{SELECT_PERSONA} WHERE matricula = ?1"))?;
    Ok(stmt.query_row([matricula], map_row).optional()?)
}

/// True when another persona (different id) already holds the matricula.
/// Exact, case-sensitive match.
pub fn matricula_taken(
    conn: &Connection,
    matricula: &str,
    exclude_id: Option<i64>,
) -> AppResult<bool> {
    let taken = match exclude_id {
        None => {
            let mut stmt = conn.prepare("SELECT 1 FROM personas WHERE matricula = ?1 LIMIT 1")?;
            stmt.exists([matricula])?
        }
        Some(id) => {
            let mut stmt =
                conn.prepare("SELECT 1 FROM personas WHERE matricula = ?1 AND id <> ?2 LIMIT 1")?;
            stmt.exists(params![matricula, id])?
        }
    };
    Ok(taken)
}

pub fn insert_persona(conn: &Connection, p: &Persona) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO personas (nombre, apellido, matricula, categoria, ruta_foto, huella)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.nombre,
            p.apellido,
            p.matricula,
            p.categoria,
            p.ruta_foto,
            p.huella,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_persona(conn: &Connection, p: &Persona) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE personas
         SET nombre = ?1, apellido = ?2, matricula = ?3,
             categoria = ?4, ruta_foto = ?5, huella = ?6
         WHERE id = ?7",
        params![
            p.nombre,
            p.apellido,
            p.matricula,
            p.categoria,
            p.ruta_foto,
            p.huella,
            p.id,
        ],
    )?;
    Ok(n)
}

pub fn delete_persona(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM personas WHERE id = ?1", [id])?;
    Ok(n)
}

/// Case-insensitive substring search over nombre, apellido and matricula.
pub fn search_personas(conn: &Connection, term: &str) -> AppResult<Vec<Persona>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_PERSONA}
         WHERE lower(nombre) LIKE ?1
            OR lower(apellido) LIKE ?1
            OR lower(matricula) LIKE ?1
         ORDER BY id ASC"
    ))?;

    let pattern = format!("%{}%", term.to_lowercase());
    let rows = stmt.query_map([pattern], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct non-empty categories, alphabetically sorted.
pub fn distinct_categorias(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT categoria FROM personas
         WHERE categoria <> ''
         ORDER BY categoria ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// (total, with custom photo) counts for directory statistics.
pub fn photo_counts(conn: &Connection) -> AppResult<(i64, i64)> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM personas", [], |row| row.get(0))?;
    let con_foto: i64 = conn.query_row(
        "SELECT COUNT(*) FROM personas WHERE ruta_foto IS NOT NULL AND ruta_foto <> ''",
        [],
        |row| row.get(0),
    )?;
    Ok((total, con_foto))
}
