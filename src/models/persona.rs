use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: i64,                     // ⇔ personas.id
    pub nombre: String,              // ⇔ personas.nombre
    pub apellido: String,            // ⇔ personas.apellido
    pub matricula: String,           // ⇔ personas.matricula (UNIQUE, case-sensitive)
    pub categoria: String,           // ⇔ personas.categoria
    pub ruta_foto: Option<String>,   // ⇔ personas.ruta_foto (custom photo file)
    #[serde(skip)]
    pub huella: Option<Vec<u8>>,     // ⇔ personas.huella (placeholder blob, never compared)
}

impl Persona {
    /// Constructor for personas created from the CLI, before insertion (id = 0).
    pub fn new(nombre: &str, apellido: &str, matricula: &str, categoria: &str) -> Self {
        Self {
            id: 0,
            nombre: nombre.trim().to_string(),
            apellido: apellido.trim().to_string(),
            matricula: matricula.trim().to_string(),
            categoria: categoria.trim().to_string(),
            ruta_foto: None,
            huella: None,
        }
    }

    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    pub fn has_custom_photo(&self) -> bool {
        self.ruta_foto.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// The single canonical photo resolution: the custom path when set and
    /// existing on disk, otherwise the default asset when existing, otherwise
    /// nothing. No other lookup path exists.
    pub fn effective_photo_path(&self, default_asset: &Path) -> Option<PathBuf> {
        if let Some(ruta) = self.ruta_foto.as_deref()
            && !ruta.is_empty()
        {
            let p = PathBuf::from(ruta);
            if p.exists() {
                return Some(p);
            }
        }
        if default_asset.exists() {
            return Some(default_asset.to_path_buf());
        }
        None
    }
}
