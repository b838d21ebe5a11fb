use crate::cli::parser::{Commands, PersonaAction};
use crate::config::Config;
use crate::core::directory::Directory;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::persona::Persona;
use crate::photos::PhotoStore;
use crate::ui::messages::success;
use crate::utils::table::Table;
use std::fs;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Persona { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;
    let photos = PhotoStore::from_config(cfg);

    match action {
        PersonaAction::Add {
            nombre,
            apellido,
            matricula,
            categoria,
            foto,
            huella,
        } => {
            let mut p = Persona::new(nombre, apellido, matricula, categoria);
            if let Some(path) = huella {
                p.huella = Some(fs::read(path)?);
            }

            let photo_bytes = read_optional(foto.as_deref())?;
            Directory::add(&mut pool, &photos, &mut p, photo_bytes.as_deref())?;

            success(format!(
                "Persona agregada correctamente (id {}, matrícula {})",
                p.id, p.matricula
            ));
        }

        PersonaAction::Update {
            id,
            nombre,
            apellido,
            matricula,
            categoria,
            foto,
        } => {
            let mut p = Directory::find_by_id(&mut pool, *id)?
                .ok_or(AppError::PersonaNotFound(*id))?;

            // Fields not given keep their stored value.
            if let Some(v) = nombre {
                p.nombre = v.trim().to_string();
            }
            if let Some(v) = apellido {
                p.apellido = v.trim().to_string();
            }
            if let Some(v) = matricula {
                p.matricula = v.trim().to_string();
            }
            if let Some(v) = categoria {
                p.categoria = v.trim().to_string();
            }

            let photo_bytes = read_optional(foto.as_deref())?;
            Directory::update(&mut pool, &photos, &mut p, photo_bytes.as_deref())?;

            success("Persona actualizada correctamente");
        }

        PersonaAction::Del { id } => {
            Directory::remove(&mut pool, &photos, *id)?;
            success("Persona eliminada correctamente");
        }

        PersonaAction::List => {
            print_personas(&Directory::list(&mut pool)?);
        }

        PersonaAction::Search { term } => {
            print_personas(&Directory::search(&mut pool, term)?);
        }

        PersonaAction::Stats => {
            let stats = Directory::statistics(&mut pool)?;
            let categorias = Directory::categories(&mut pool)?;

            println!();
            println!("Total personas: {}", stats.total);
            println!("Con foto:       {}", stats.con_foto);
            println!("Sin foto:       {}", stats.sin_foto);
            println!("Categorías:     {}", categorias.join(", "));
            println!();
        }
    }

    Ok(())
}

fn read_optional(path: Option<&Path>) -> AppResult<Option<Vec<u8>>> {
    match path {
        Some(p) => Ok(Some(fs::read(p)?)),
        None => Ok(None),
    }
}

fn print_personas(personas: &[Persona]) {
    let mut table = Table::new(&["Id", "Nombre", "Apellido", "Matrícula", "Tipo", "Foto"]);
    for p in personas {
        table.add_row(vec![
            p.id.to_string(),
            p.nombre.clone(),
            p.apellido.clone(),
            p.matricula.clone(),
            p.categoria.clone(),
            if p.has_custom_photo() { "sí" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", table.render());
}
