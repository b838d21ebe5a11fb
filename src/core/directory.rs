//! Person directory: CRUD over personas plus photo lifecycle.
//!
//! Matricula uniqueness is enforced here at write time, on add and update.
//! Photo cleanup is always best-effort: it never changes the outcome of the
//! primary operation.

use crate::db::{personas, pool::DbPool};
use crate::errors::{AppError, AppResult};
use crate::models::persona::Persona;
use crate::photos::PhotoStore;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct DirectoryStats {
    pub total: i64,
    pub con_foto: i64,
    pub sin_foto: i64,
}

pub struct Directory;

impl Directory {
    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Persona>> {
        personas::list_personas(&pool.conn)
    }

    pub fn find_by_id(pool: &mut DbPool, id: i64) -> AppResult<Option<Persona>> {
        personas::find_by_id(&pool.conn, id)
    }

    pub fn find_by_matricula(pool: &mut DbPool, matricula: &str) -> AppResult<Option<Persona>> {
        personas::find_by_matricula(&pool.conn, matricula)
    }

    pub fn search(pool: &mut DbPool, term: &str) -> AppResult<Vec<Persona>> {
        personas::search_personas(&pool.conn, term)
    }

    pub fn categories(pool: &mut DbPool) -> AppResult<Vec<String>> {
        personas::distinct_categorias(&pool.conn)
    }

    pub fn statistics(pool: &mut DbPool) -> AppResult<DirectoryStats> {
        let (total, con_foto) = personas::photo_counts(&pool.conn)?;
        Ok(DirectoryStats {
            total,
            con_foto,
            sin_foto: total - con_foto,
        })
    }

    /// Add a persona. When photo bytes are given, the photo file is written
    /// before the row commits; if the insert then fails the file is removed
    /// again (best-effort).
    pub fn add(
        pool: &mut DbPool,
        photos: &PhotoStore,
        p: &mut Persona,
        photo_bytes: Option<&[u8]>,
    ) -> AppResult<()> {
        Self::validate(p)?;

        if personas::matricula_taken(&pool.conn, &p.matricula, None)? {
            return Err(AppError::DuplicateMatricula(p.matricula.clone()));
        }

        let mut written_photo = None;
        if let Some(bytes) = photo_bytes {
            let path = photos.save(&p.matricula, bytes)?;
            p.ruta_foto = Some(path.to_string_lossy().to_string());
            written_photo = Some(path);
        }

        match personas::insert_persona(&pool.conn, p) {
            Ok(id) => {
                p.id = id;
                Ok(())
            }
            Err(e) => {
                if let Some(path) = written_photo {
                    photos.try_delete(&path);
                }
                Err(e)
            }
        }
    }

    /// Full replace of the mutable fields. A new photo supersedes the old
    /// file; no photo bytes preserves whatever path was stored before.
    pub fn update(
        pool: &mut DbPool,
        photos: &PhotoStore,
        p: &mut Persona,
        photo_bytes: Option<&[u8]>,
    ) -> AppResult<()> {
        let existing = personas::find_by_id(&pool.conn, p.id)?
            .ok_or(AppError::PersonaNotFound(p.id))?;

        Self::validate(p)?;

        if personas::matricula_taken(&pool.conn, &p.matricula, Some(p.id))? {
            return Err(AppError::DuplicateMatricula(p.matricula.clone()));
        }

        match photo_bytes {
            Some(bytes) => {
                if let Some(old) = existing.ruta_foto.as_deref()
                    && !old.is_empty()
                {
                    photos.try_delete(Path::new(old));
                }
                let path = photos.save(&p.matricula, bytes)?;
                p.ruta_foto = Some(path.to_string_lossy().to_string());
            }
            None => {
                p.ruta_foto = existing.ruta_foto.clone();
            }
        }

        let n = personas::update_persona(&pool.conn, p)?;
        if n == 0 {
            return Err(AppError::PersonaNotFound(p.id));
        }
        Ok(())
    }

    /// Delete the row, then best-effort delete the custom photo file.
    pub fn remove(pool: &mut DbPool, photos: &PhotoStore, id: i64) -> AppResult<()> {
        let existing = personas::find_by_id(&pool.conn, id)?
            .ok_or(AppError::PersonaNotFound(id))?;

        let n = personas::delete_persona(&pool.conn, id)?;
        if n == 0 {
            return Err(AppError::PersonaNotFound(id));
        }

        if let Some(ruta) = existing.ruta_foto.as_deref()
            && !ruta.is_empty()
        {
            photos.try_delete(Path::new(ruta));
        }
        Ok(())
    }

    fn validate(p: &Persona) -> AppResult<()> {
        if p.nombre.trim().is_empty() {
            return Err(AppError::Validation("El nombre es obligatorio".into()));
        }
        if p.apellido.trim().is_empty() {
            return Err(AppError::Validation("El apellido es obligatorio".into()));
        }
        if p.matricula.trim().is_empty() {
            return Err(AppError::Validation("La matrícula es obligatoria".into()));
        }
        if p.categoria.trim().is_empty() {
            return Err(AppError::Validation(
                "El tipo de persona es obligatorio".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use std::env;

    fn test_pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn test_photos(name: &str) -> PhotoStore {
        let dir = env::temp_dir().join(format!("checador_dir_{name}"));
        std::fs::remove_dir_all(&dir).ok();
        PhotoStore::new(dir)
    }

    #[test]
    fn duplicate_matricula_is_rejected_and_store_unchanged() {
        let mut pool = test_pool();
        let photos = test_photos("dup");

        let mut a = Persona::new("Ana", "García", "A100", "Asesor");
        Directory::add(&mut pool, &photos, &mut a, None).unwrap();

        let mut b = Persona::new("Berta", "López", "A100", "Brigadista");
        let err = Directory::add(&mut pool, &photos, &mut b, None).unwrap_err();
        assert!(matches!(err, AppError::DuplicateMatricula(_)));

        assert_eq!(Directory::list(&mut pool).unwrap().len(), 1);
    }

    #[test]
    fn update_rejects_matricula_of_another_persona() {
        let mut pool = test_pool();
        let photos = test_photos("upd");

        let mut a = Persona::new("Ana", "García", "A100", "Asesor");
        Directory::add(&mut pool, &photos, &mut a, None).unwrap();
        let mut b = Persona::new("Berta", "López", "B200", "Asesor");
        Directory::add(&mut pool, &photos, &mut b, None).unwrap();

        b.matricula = "A100".into();
        let err = Directory::update(&mut pool, &photos, &mut b, None).unwrap_err();
        assert!(matches!(err, AppError::DuplicateMatricula(_)));
    }

    #[test]
    fn update_without_photo_bytes_preserves_existing_path() {
        let mut pool = test_pool();
        let photos = test_photos("keep");

        let mut p = Persona::new("Ana", "García", "A100", "Asesor");
        Directory::add(&mut pool, &photos, &mut p, Some(b"img")).unwrap();
        let stored = p.ruta_foto.clone();
        assert!(stored.is_some());

        p.nombre = "Ana María".into();
        p.ruta_foto = None;
        Directory::update(&mut pool, &photos, &mut p, None).unwrap();
        assert_eq!(p.ruta_foto, stored);

        let reloaded = Directory::find_by_id(&mut pool, p.id).unwrap().unwrap();
        assert_eq!(reloaded.ruta_foto, stored);
        assert_eq!(reloaded.nombre, "Ana María");
    }

    #[test]
    fn remove_missing_persona_is_not_found() {
        let mut pool = test_pool();
        let photos = test_photos("rm");
        let err = Directory::remove(&mut pool, &photos, 99).unwrap_err();
        assert!(matches!(err, AppError::PersonaNotFound(99)));
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let mut pool = test_pool();
        let photos = test_photos("search");

        let mut a = Persona::new("Ana", "García", "A100", "Asesor");
        Directory::add(&mut pool, &photos, &mut a, None).unwrap();
        let mut b = Persona::new("Pedro", "Anaya", "B200", "Brigadista");
        Directory::add(&mut pool, &photos, &mut b, None).unwrap();

        let hits = Directory::search(&mut pool, "ana").unwrap();
        assert_eq!(hits.len(), 2);

        let hits = Directory::search(&mut pool, "b2").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matricula, "B200");
    }

    #[test]
    fn categories_are_distinct_sorted_non_empty() {
        let mut pool = test_pool();
        let photos = test_photos("cat");

        for (n, m, c) in [
            ("Ana", "A1", "Brigadista"),
            ("Bea", "A2", "Asesor"),
            ("Carla", "A3", "Asesor"),
        ] {
            let mut p = Persona::new(n, "X", m, c);
            Directory::add(&mut pool, &photos, &mut p, None).unwrap();
        }

        assert_eq!(
            Directory::categories(&mut pool).unwrap(),
            vec!["Asesor".to_string(), "Brigadista".to_string()]
        );
    }

    #[test]
    fn statistics_split_by_photo_presence() {
        let mut pool = test_pool();
        let photos = test_photos("stats");

        let mut a = Persona::new("Ana", "García", "A100", "Asesor");
        Directory::add(&mut pool, &photos, &mut a, Some(b"img")).unwrap();
        let mut b = Persona::new("Berta", "López", "B200", "Asesor");
        Directory::add(&mut pool, &photos, &mut b, None).unwrap();

        let stats = Directory::statistics(&mut pool).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.con_foto, 1);
        assert_eq!(stats.sin_foto, 1);
    }
}
