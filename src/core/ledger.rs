//! Attendance ledger: the append-mostly log of Entrada/Salida registros and
//! the two-state automaton that drives check-ins.
//!
//! The automaton's state is never stored. It is re-derived from the latest
//! registro on every call, so the log alone is enough to recover or replay.

use crate::db::{personas, pool::DbPool, registros};
use crate::errors::{AppError, AppResult};
use crate::models::action::ActionKind;
use crate::models::registro::Registro;
use chrono::{Local, NaiveDate, Timelike};

pub struct Ledger;

impl Ledger {
    pub fn all_events(pool: &mut DbPool) -> AppResult<Vec<Registro>> {
        registros::load_all(&pool.conn)
    }

    /// Events for one persona, ascending by (date, time).
    pub fn events_for_persona(pool: &mut DbPool, persona_id: i64) -> AppResult<Vec<Registro>> {
        registros::load_for_persona(&pool.conn, persona_id)
    }

    pub fn latest_event_for_persona(
        pool: &mut DbPool,
        persona_id: i64,
    ) -> AppResult<Option<Registro>> {
        registros::load_latest_for_persona(&pool.conn, persona_id)
    }

    /// Entrada when there is no prior registro or the latest is a Salida;
    /// Salida when the latest is an Entrada.
    pub fn next_action_kind(pool: &mut DbPool, persona_id: i64) -> AppResult<ActionKind> {
        Self::next_kind_on(&pool.conn, persona_id)
    }

    fn next_kind_on(conn: &rusqlite::Connection, persona_id: i64) -> AppResult<ActionKind> {
        let latest = registros::load_latest_for_persona(conn, persona_id)?;
        Ok(match latest {
            Some(ev) => ev.kind.flip(),
            None => ActionKind::Entrada,
        })
    }

    /// Register the next event for a persona: derive the kind from the log,
    /// stamp the current date and time, append, and return the stored row
    /// joined with its owner.
    ///
    /// Read-latest and append run inside one transaction on the single
    /// connection, so in-process registrations are serialized per database.
    pub fn register(pool: &mut DbPool, persona_id: i64) -> AppResult<Registro> {
        let tx = pool.conn.transaction()?;

        let persona = personas::find_by_id(&tx, persona_id)?
            .ok_or(AppError::PersonaNotFound(persona_id))?;

        let kind = Self::next_kind_on(&tx, persona_id)?;

        let now = Local::now();
        let reg = Registro {
            id: 0,
            persona_id,
            kind,
            date: now.date_naive(),
            // sub-second precision is never stored
            time: now.time().with_nanosecond(0).unwrap_or(now.time()),
            persona,
        };

        let id = registros::insert_registro(&tx, &reg)?;
        tx.commit()?;

        registros::load_by_id(&pool.conn, id)?.ok_or(AppError::RegistroNotFound(id))
    }

    /// Inclusive range query, optionally filtered by exact category.
    /// `categoria = None` means no filter.
    pub fn events_in_range(
        pool: &mut DbPool,
        start: NaiveDate,
        end: NaiveDate,
        categoria: Option<&str>,
    ) -> AppResult<Vec<Registro>> {
        registros::load_range(&pool.conn, &start, &end, categoria)
    }

    pub fn remove(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let n = registros::delete_registro(&pool.conn, id)?;
        if n == 0 {
            return Err(AppError::RegistroNotFound(id));
        }
        Ok(())
    }

    /// Data-correction path; not part of the check-in flow.
    pub fn update(pool: &mut DbPool, ev: &Registro) -> AppResult<()> {
        let n = registros::update_registro(&pool.conn, ev)?;
        if n == 0 {
            return Err(AppError::RegistroNotFound(ev.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::models::persona::Persona;
    use chrono::NaiveTime;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn seed_persona(pool: &mut DbPool, nombre: &str, matricula: &str) -> i64 {
        let p = Persona::new(nombre, "Test", matricula, "Asesor");
        personas::insert_persona(&pool.conn, &p).unwrap()
    }

    fn seed_event(
        pool: &mut DbPool,
        persona_id: i64,
        kind: ActionKind,
        date: &str,
        time: &str,
    ) -> i64 {
        let persona = personas::find_by_id(&pool.conn, persona_id).unwrap().unwrap();
        let reg = Registro {
            id: 0,
            persona_id,
            kind,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap(),
            persona,
        };
        registros::insert_registro(&pool.conn, &reg).unwrap()
    }

    #[test]
    fn first_action_is_entrada() {
        let mut pool = test_pool();
        let id = seed_persona(&mut pool, "Ana", "A100");
        assert_eq!(
            Ledger::next_action_kind(&mut pool, id).unwrap(),
            ActionKind::Entrada
        );
    }

    #[test]
    fn register_alternates_with_period_two() {
        let mut pool = test_pool();
        let id = seed_persona(&mut pool, "Ana", "A100");

        let first = Ledger::register(&mut pool, id).unwrap();
        assert_eq!(first.kind, ActionKind::Entrada);
        assert_eq!(
            Ledger::next_action_kind(&mut pool, id).unwrap(),
            ActionKind::Salida
        );

        let second = Ledger::register(&mut pool, id).unwrap();
        assert_eq!(second.kind, ActionKind::Salida);
        assert_eq!(
            Ledger::next_action_kind(&mut pool, id).unwrap(),
            ActionKind::Entrada
        );
    }

    #[test]
    fn register_joins_owner_and_appends_last() {
        let mut pool = test_pool();
        let id = seed_persona(&mut pool, "Ana", "A100");

        let reg = Ledger::register(&mut pool, id).unwrap();
        assert_eq!(reg.persona.matricula, "A100");

        let events = Ledger::events_for_persona(&mut pool, id).unwrap();
        assert_eq!(events.last().unwrap().id, reg.id);
    }

    #[test]
    fn register_unknown_persona_fails() {
        let mut pool = test_pool();
        let err = Ledger::register(&mut pool, 42).unwrap_err();
        assert!(matches!(err, AppError::PersonaNotFound(42)));
    }

    #[test]
    fn latest_tie_break_prefers_highest_id() {
        let mut pool = test_pool();
        let id = seed_persona(&mut pool, "Ana", "A100");

        seed_event(&mut pool, id, ActionKind::Entrada, "2025-09-01", "08:00:00");
        let dup = seed_event(&mut pool, id, ActionKind::Salida, "2025-09-01", "08:00:00");

        let latest = Ledger::latest_event_for_persona(&mut pool, id)
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, dup);
    }

    #[test]
    fn range_query_is_inclusive_and_category_filtered() {
        let mut pool = test_pool();
        let a = seed_persona(&mut pool, "Ana", "A100");
        let b = {
            let p = Persona::new("Berta", "Test", "B200", "Brigadista");
            personas::insert_persona(&pool.conn, &p).unwrap()
        };

        seed_event(&mut pool, a, ActionKind::Entrada, "2025-09-01", "08:00:00");
        seed_event(&mut pool, b, ActionKind::Entrada, "2025-09-02", "09:00:00");
        seed_event(&mut pool, a, ActionKind::Entrada, "2025-09-03", "08:30:00");

        let s = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let e = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();

        let all = Ledger::events_in_range(&mut pool, s, e, None).unwrap();
        assert_eq!(all.len(), 2);

        let brigadistas = Ledger::events_in_range(&mut pool, s, e, Some("Brigadista")).unwrap();
        assert_eq!(brigadistas.len(), 1);
        assert_eq!(brigadistas[0].persona.matricula, "B200");
    }

    #[test]
    fn remove_missing_registro_is_not_found() {
        let mut pool = test_pool();
        let err = Ledger::remove(&mut pool, 7).unwrap_err();
        assert!(matches!(err, AppError::RegistroNotFound(7)));
    }

    #[test]
    fn update_corrects_a_stored_event() {
        let mut pool = test_pool();
        let id = seed_persona(&mut pool, "Ana", "A100");
        let ev_id = seed_event(&mut pool, id, ActionKind::Entrada, "2025-09-01", "08:00:00");

        let mut ev = registros::load_by_id(&pool.conn, ev_id).unwrap().unwrap();
        ev.time = NaiveTime::parse_from_str("08:15:00", "%H:%M:%S").unwrap();
        Ledger::update(&mut pool, &ev).unwrap();

        let back = registros::load_by_id(&pool.conn, ev_id).unwrap().unwrap();
        assert_eq!(back.time_str(), "08:15:00");
    }
}
