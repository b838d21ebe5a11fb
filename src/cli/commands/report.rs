use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::runner::{ReportRequest, ReportRunner};
use crate::errors::AppResult;
use crate::export::{get_headers, row_to_strings, stats_block};
use crate::models::report::{ReportRow, ReportSummary};
use crate::ui::messages::warning;
use crate::utils::date::parse_date_arg;
use crate::utils::table::Table;

/// Sentinel category meaning "no filter".
pub const TODOS: &str = "Todos";

pub fn categoria_filter(categoria: Option<&str>) -> Option<String> {
    match categoria {
        None => None,
        Some(c) if c == TODOS => None,
        Some(c) => Some(c.to_string()),
    }
}

/// A filter outside the configured category list still runs (the column is
/// free-form), but the typo case deserves a heads-up.
pub fn warn_unknown_categoria(cfg: &Config, filter: Option<&str>) {
    if let Some(cat) = filter
        && !cfg.categorias.iter().any(|c| c == cat)
    {
        warning(format!("Categoría no configurada: {cat}"));
    }
}

/// Handle the `report` command: generate on the worker, render on this thread.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        from,
        to,
        categoria,
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

        print_report(&rows, &summary);
    }
    Ok(())
}

fn print_report(rows: &[ReportRow], summary: &ReportSummary) {
    let mut table = Table::new(&get_headers());
    for r in rows {
        table.add_row(row_to_strings(r));
    }
    println!("{}", table.render());

    println!("ESTADÍSTICAS");
    for (label, value) in stats_block(summary) {
        println!("  {label} {value}");
    }
    println!();
}
