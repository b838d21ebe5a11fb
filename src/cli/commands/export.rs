use crate::cli::commands::report::{categoria_filter, warn_unknown_categoria};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::core::runner::{ReportRequest, ReportRunner};
use crate::errors::AppResult;
use crate::utils::date::parse_date_arg;
use std::path::PathBuf;

/// Handle the `export` command: generate on the worker, then render the
/// spreadsheet into the destination directory.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        from,
        to,
        categoria,
        format,
        dir,
    } = cmd
    {
        let start = parse_date_arg(from)?;
        let end = parse_date_arg(to)?;

        let filter = categoria_filter(categoria.as_deref());
        warn_unknown_categoria(cfg, filter.as_deref());

        let runner = ReportRunner::new();
        let (rows, summary) = runner.generate(ReportRequest {
            db_path: cfg.database.clone(),
            start,
            end,
            categoria: filter,
        })?;

        let dest = dir
            .clone()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&cfg.export_dir));

        let path = ReportLogic::export(&rows, &summary, &dest, *format)?;
        println!("Archivo exportado exitosamente: {}", path.display());
    }
    Ok(())
}
