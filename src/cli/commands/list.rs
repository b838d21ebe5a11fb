use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::registro::Registro;
use crate::utils::date::parse_date_arg;
use crate::utils::table::Table;

/// Handle the `list` command: raw ledger rows, optionally restricted to one
/// matricula and/or a date range.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        matricula,
        from,
        to,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let events = match (matricula, from, to) {
            (Some(m), None, None) => {
                let persona = Directory::find_by_matricula(&mut pool, m)?
                    .ok_or_else(|| AppError::MatriculaNotFound(m.clone()))?;
                Ledger::events_for_persona(&mut pool, persona.id)?
            }
            (None, Some(f), Some(t)) => {
                let start = parse_date_arg(f)?;
                let end = parse_date_arg(t)?;
                Ledger::events_in_range(&mut pool, start, end, None)?
            }
            (Some(m), Some(f), Some(t)) => {
                let persona = Directory::find_by_matricula(&mut pool, m)?
                    .ok_or_else(|| AppError::MatriculaNotFound(m.clone()))?;
                let start = parse_date_arg(f)?;
                let end = parse_date_arg(t)?;
                let all = Ledger::events_in_range(&mut pool, start, end, None)?;
                all.into_iter()
                    .filter(|e| e.persona_id == persona.id)
                    .collect()
            }
            (None, None, None) => Ledger::all_events(&mut pool)?,
            _ => {
                return Err(AppError::InvalidRange(
                    "--from and --to must be given together".into(),
                ));
            }
        };

        print_events(&events);
    }
    Ok(())
}

fn print_events(events: &[Registro]) {
    let mut table = Table::new(&["Id", "Fecha", "Hora", "Acción", "Matrícula", "Nombre"]);
    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.date_str(),
            ev.time_str(),
            ev.kind.to_string(),
            ev.persona.matricula.clone(),
            ev.persona.nombre_completo(),
        ]);
    }
    println!("{}", table.render());
    println!("{} registro(s)", events.len());
}
