use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Handle the `status` command: what the check-in screen shows for a badge.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { matricula } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let persona = Directory::find_by_matricula(&mut pool, matricula)?
            .ok_or_else(|| AppError::MatriculaNotFound(matricula.clone()))?;

        let latest = Ledger::latest_event_for_persona(&mut pool, persona.id)?;
        let next = Ledger::next_action_kind(&mut pool, persona.id)?;

        let foto = persona
            .effective_photo_path(Path::new(&cfg.default_photo))
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Sin foto".to_string());

        println!();
        println!("Persona:          {}", persona.nombre_completo());
        println!("Matrícula:        {}", persona.matricula);
        println!("Tipo:             {}", persona.categoria);
        println!("Foto:             {foto}");

        match latest {
            Some(ev) => {
                println!(
                    "Último registro:  {} el {} a las {}",
                    ev.kind,
                    ev.date.format("%d/%m/%Y"),
                    ev.time_str()
                );
            }
            None => println!("Último registro:  Sin registros"),
        }

        println!("Próxima acción:   {next}");
        println!();
    }
    Ok(())
}
