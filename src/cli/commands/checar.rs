use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::directory::Directory;
use crate::core::ledger::Ledger;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{StatusMessage, success};

/// Handle the `checar` command: the badge-scan flow.
///
/// The matricula is looked up, the next action is derived from the ledger
/// and the registro is appended with the current date and time. An unknown
/// matricula propagates as an error and is reported once, by the entrypoint.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checar { matricula } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let persona = Directory::find_by_matricula(&mut pool, matricula)?
            .ok_or_else(|| AppError::MatriculaNotFound(matricula.clone()))?;

        let reg = Ledger::register(&mut pool, persona.id)?;

        let msg = StatusMessage::success(format!("{} registrada exitosamente", reg.kind));
        success(format!(
            "{} — {} ({}) a las {}",
            msg.text,
            persona.nombre_completo(),
            persona.matricula,
            reg.time_str()
        ));
    }
    Ok(())
}
