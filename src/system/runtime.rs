// src/system/runtime.rs

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::core::resolver::ResolverError;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("No se pudo cargar la unidad de código {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Clase '{name}' no encontrada en ninguna ruta de búsqueda.")]
    ClassNotFound { name: String },
    #[error("Un cargador registrado está prestado de forma mutable y no puede atender la carga.")]
    HandlerBusy,
    #[error("Error del cargador: {0}")]
    Resolver(#[from] ResolverError),
}

/// Lo que el resolvedor necesita del runtime anfitrión.
pub trait ClassHost {
    fn class_exists(&self, name: &str) -> bool;

    /// Carga la unidad en `path` una sola vez, asumiendo que define `class`.
    /// Devuelve `false` si la ruta ya se había incluido antes.
    fn include_class(&mut self, class: &str, path: &Path) -> Result<bool, HostError>;
}

/// Un manejador que el runtime invoca cuando se pide una clase no definida.
pub trait Autoload {
    fn autoload(&self, class: &str, host: &mut dyn ClassHost) -> Result<bool, ResolverError>;
}

pub type SharedAutoloader = Rc<RefCell<dyn Autoload>>;

/// Tabla de clases definidas y unidades ya incluidas.
#[derive(Debug, Default)]
pub struct SymbolTable {
    // `None` para las clases definidas sin archivo (internas).
    classes: HashMap<String, Option<PathBuf>>,
    included: HashSet<PathBuf>,
    sources: HashMap<PathBuf, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una clase interna, sin archivo de origen.
    pub fn define_class(&mut self, name: impl Into<String>) {
        self.classes.insert(name.into(), None);
    }

    pub fn class_file(&self, name: &str) -> Option<&Path> {
        self.classes.get(name)?.as_deref()
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        let path = self.class_file(name)?;
        self.sources.get(path).map(String::as_str)
    }

    pub fn included_files(&self) -> impl Iterator<Item = &Path> {
        self.included.iter().map(PathBuf::as_path)
    }

    pub fn defined_classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

impl ClassHost for SymbolTable {
    fn class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    fn include_class(&mut self, class: &str, path: &Path) -> Result<bool, HostError> {
        if self.included.contains(path) {
            log::debug!("{:?} ya estaba incluido, se omite.", path);
            return Ok(false);
        }

        let source = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Cargada la clase '{}' desde {:?}", class, path);
        self.included.insert(path.to_path_buf());
        self.sources.insert(path.to_path_buf(), source);
        self.classes
            .insert(class.to_string(), Some(path.to_path_buf()));
        Ok(true)
    }
}

/// El runtime anfitrión: tabla de símbolos más la cola de cargadores.
#[derive(Default)]
pub struct Runtime {
    symbols: SymbolTable,
    autoloaders: Vec<SharedAutoloader>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn autoloader_count(&self) -> usize {
        self.autoloaders.len()
    }

    pub fn register_autoloader(&mut self, handler: SharedAutoloader, prepend: bool) {
        if prepend {
            self.autoloaders.insert(0, handler);
        } else {
            self.autoloaders.push(handler);
        }
    }

    /// Garantiza que `name` esté definida, invocando los cargadores en orden.
    /// Si ninguno la define, el error es responsabilidad del llamador.
    pub fn require_class(&mut self, name: &str) -> Result<(), RuntimeError> {
        if self.symbols.class_exists(name) {
            return Ok(());
        }

        for handler in &self.autoloaders {
            let handler = handler.try_borrow().map_err(|_| RuntimeError::HandlerBusy)?;
            let loaded = handler.autoload(name, &mut self.symbols)?;
            if loaded && self.symbols.class_exists(name) {
                return Ok(());
            }
        }

        Err(RuntimeError::ClassNotFound {
            name: name.to_string(),
        })
    }
}
