use rusqlite::{Connection, OptionalExtension, Result};

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let found: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

/// Create the `personas` table with the current schema.
///
/// `huella` is a placeholder biometric blob: stored and returned, never
/// compared or validated.
fn create_personas_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS personas (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre     TEXT NOT NULL,
            apellido   TEXT NOT NULL,
            matricula  TEXT NOT NULL UNIQUE,
            categoria  TEXT NOT NULL DEFAULT '',
            ruta_foto  TEXT,
            huella     BLOB
        );

        CREATE INDEX IF NOT EXISTS idx_personas_matricula ON personas(matricula);
        "#,
    )?;
    Ok(())
}

/// Create the `registros` table with the current schema.
///
/// There is deliberately NO stored "current state" column: the Entrada/Salida
/// automaton is always re-derived from the latest row, keeping the log the
/// single source of truth.
fn create_registros_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS registros (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            persona_id  INTEGER NOT NULL REFERENCES personas(id),
            kind        TEXT NOT NULL CHECK(kind IN ('Entrada','Salida')),
            date        TEXT NOT NULL,
            time        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_registros_persona_date_time
            ON registros(persona_id, date, time);
        CREATE INDEX IF NOT EXISTS idx_registros_date_time ON registros(date, time);
        "#,
    )?;
    Ok(())
}

/// Run all pending schema migrations. Idempotent: safe to call on every start.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    create_personas_table(conn)?;
    create_registros_table(conn)?;

    // Older databases stored categoria as NULL; normalize once so the
    // distinct-categories query stays simple.
    if table_exists(conn, "personas")? {
        conn.execute(
            "UPDATE personas SET categoria = '' WHERE categoria IS NULL",
            [],
        )?;
    }

    Ok(())
}
