mod common;

use common::*;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_persona_add_and_list() {
    let db = setup_test_db("persona_add_list");
    init_db(&db);
    add_persona(&db, "Ana", "García", "A100", "Asesor");
    add_persona(&db, "Berta", "López", "B200", "Brigadista");

    che()
        .args(["--db", &db, "persona", "list"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("García"))
        .stdout(contains("B200"))
        .stdout(contains("Brigadista"));
}

#[test]
fn test_persona_add_duplicate_matricula_fails() {
    let db = setup_test_db("persona_dup");
    init_db(&db);
    add_persona(&db, "Ana", "García", "A100", "Asesor");

    che()
        .args([
            "--db",
            &db,
            "persona",
            "add",
            "--nombre",
            "Otra",
            "--apellido",
            "Persona",
            "--matricula",
            "A100",
            "--categoria",
            "Asesor",
        ])
        .assert()
        .failure()
        .stderr(contains("Ya existe una persona con la matrícula"));
}

#[test]
fn test_persona_add_empty_nombre_fails() {
    let db = setup_test_db("persona_empty_nombre");
    init_db(&db);

    che()
        .args([
            "--db",
            &db,
            "persona",
            "add",
            "--nombre",
            "  ",
            "--apellido",
            "García",
            "--matricula",
            "A100",
            "--categoria",
            "Asesor",
        ])
        .assert()
        .failure()
        .stderr(contains("El nombre es obligatorio"));
}

#[test]
fn test_persona_search_matches_nombre() {
    let db = setup_test_db("persona_search");
    init_db(&db);
    add_persona(&db, "Ana", "García", "A100", "Asesor");
    add_persona(&db, "Berta", "López", "B200", "Brigadista");

    che()
        .args(["--db", &db, "persona", "search", "ana"])
        .assert()
        .success()
        .stdout(contains("Ana"))
        .stdout(contains("Berta").not());
}

#[test]
fn test_persona_update_categoria() {
    let db = setup_test_db("persona_update");
    init_db(&db);
    add_persona(&db, "Ana", "García", "A100", "Asesor");

    che()
        .args([
            "--db",
            &db,
            "persona",
            "update",
            "--id",
            "1",
            "--categoria",
            "Administrativo",
        ])
        .assert()
        .success()
        .stdout(contains("Persona actualizada correctamente"));

    che()
        .args(["--db", &db, "persona", "list"])
        .assert()
        .success()
        .stdout(contains("Administrativo"));
}

#[test]
fn test_persona_update_unknown_id_fails() {
    let db = setup_test_db("persona_update_missing");
    init_db(&db);

    che()
        .args(["--db", &db, "persona", "update", "--id", "42", "--nombre", "X"])
        .assert()
        .failure()
        .stderr(contains("Persona not found"));
}

#[test]
fn test_persona_del_removes_row() {
    let db = setup_test_db("persona_del");
    init_db(&db);
    add_persona(&db, "Ana", "García", "A100", "Asesor");

    che()
        .args(["--db", &db, "persona", "del", "--id", "1"])
        .assert()
        .success()
        .stdout(contains("Persona eliminada correctamente"));

    che()
        .args(["--db", &db, "persona", "list"])
        .assert()
        .success()
        .stdout(contains("Ana").not());
}

#[test]
fn test_persona_stats() {
    let db = setup_test_db("persona_stats");
    init_db(&db);
    add_persona(&db, "Ana", "García", "A100", "Asesor");
    add_persona(&db, "Berta", "López", "B200", "Brigadista");

    che()
        .args(["--db", &db, "persona", "stats"])
        .assert()
        .success()
        .stdout(contains("Total personas: 2"))
        .stdout(contains("Sin foto:       2"))
        .stdout(contains("Asesor"));
}
