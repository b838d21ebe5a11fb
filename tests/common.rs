#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::params;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn che() -> Command {
    cargo_bin_cmd!("checador")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_checador.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a unique empty output directory inside the temp dir
pub fn temp_out_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_checador_out", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_dir_all(&p).ok();
    p
}

/// Initialize the DB schema via the CLI (uses --test so the user's real
/// configuration file is never touched)
pub fn init_db(db_path: &str) {
    che()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a persona through the CLI
pub fn add_persona(db_path: &str, nombre: &str, apellido: &str, matricula: &str, categoria: &str) {
    che()
        .args([
            "--db",
            db_path,
            "persona",
            "add",
            "--nombre",
            nombre,
            "--apellido",
            apellido,
            "--matricula",
            matricula,
            "--categoria",
            categoria,
        ])
        .assert()
        .success();
}

/// Insert a registro with a fixed date/time directly through the DB layer,
/// for tests that need deterministic times
pub fn seed_event(db_path: &str, matricula: &str, kind: &str, date: &str, time: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let persona = checador::db::personas::find_by_matricula(&conn, matricula)
        .expect("query persona")
        .expect("persona exists");

    conn.execute(
        "INSERT INTO registros (persona_id, kind, date, time) VALUES (?1, ?2, ?3, ?4)",
        params![persona.id, kind, date, time],
    )
    .expect("insert registro");
}

/// Standard dataset used by report/export tests:
/// - Ana (A100, Asesor): 2025-09-01 08:00 → 17:30  (9.5h)
/// - Ana (A100, Asesor): 2025-09-02 22:00 → 06:00  (8.0h overnight)
/// - Berta (B200, Brigadista): 2025-09-03 09:00, no salida (0h)
pub fn init_db_with_report_data(db_path: &str) {
    init_db(db_path);
    add_persona(db_path, "Ana", "García", "A100", "Asesor");
    add_persona(db_path, "Berta", "López", "B200", "Brigadista");

    seed_event(db_path, "A100", "Entrada", "2025-09-01", "08:00:00");
    seed_event(db_path, "A100", "Salida", "2025-09-01", "17:30:00");
    seed_event(db_path, "A100", "Entrada", "2025-09-02", "22:00:00");
    seed_event(db_path, "A100", "Salida", "2025-09-02", "06:00:00");
    seed_event(db_path, "B200", "Entrada", "2025-09-03", "09:00:00");
}
