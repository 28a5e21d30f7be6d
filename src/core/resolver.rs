// src/core/resolver.rs

use std::cell::RefCell;
use std::env;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::models::{PathEntry, PrefixStrip, ResolverOptions};
use crate::system::runtime::{Autoload, ClassHost, HostError, Runtime};

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("{0} es una instancia única por proceso. No se puede clonar.")]
    NotDuplicable(&'static str),
    #[error("Error del runtime anfitrión: {0}")]
    Host(#[from] HostError),
}

pub type SharedResolver = Rc<RefCell<ClassResolver>>;

/// Resuelve nombres de clase a archivos recorriendo una lista ordenada de
/// rutas de búsqueda. La primera coincidencia gana.
///
/// No implementa `Clone`: el proceso construye una sola instancia al
/// arrancar y la reparte como [`SharedResolver`].
#[derive(Debug, Default)]
pub struct ClassResolver {
    paths: Vec<PathEntry>,
    options: ResolverOptions,
}

impl ClassResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            paths: Vec::new(),
            options,
        }
    }

    /// Inicializa las rutas a partir de una lista separada por el separador
    /// de rutas de la plataforma (`:` en Unix, `;` en Windows).
    pub fn from_include_path(include_path: &str, options: ResolverOptions) -> Self {
        let mut resolver = Self::new(options);
        resolver.paths = env::split_paths(include_path)
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathEntry::Plain)
            .collect();
        log::debug!("Rutas iniciales: {:?}", resolver.paths);
        resolver
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.paths
    }

    /// Añade una ruta al final de la lista, o al principio si `prepend`.
    /// Un `namespace` no vacío convierte la entrada en una con prefijo.
    pub fn add_path(
        &mut self,
        path: impl Into<PathBuf>,
        namespace: &str,
        prepend: bool,
    ) -> &mut Self {
        if prepend {
            return self.prepend_path(path, namespace);
        }
        let entry = self.make_entry(path.into(), namespace);
        log::debug!("Añadida ruta de búsqueda: {}", entry);
        self.paths.push(entry);
        self
    }

    /// Inserta una ruta al principio de la lista, con máxima prioridad.
    pub fn prepend_path(&mut self, path: impl Into<PathBuf>, namespace: &str) -> &mut Self {
        let entry = self.make_entry(path.into(), namespace);
        log::debug!("Antepuesta ruta de búsqueda: {}", entry);
        self.paths.insert(0, entry);
        self
    }

    /// La duplicación no está permitida; siempre devuelve error.
    pub fn try_clone(&self) -> Result<Self, ResolverError> {
        Err(ResolverError::NotDuplicable(std::any::type_name::<Self>()))
    }

    /// Ruta relativa candidata: `Foo_Bar` -> `Foo/Bar.php`.
    pub fn candidate_path(&self, class: &str) -> String {
        let mut path = class.replace(self.options.separator, "/");
        path.push_str(&self.options.extension);
        path
    }

    /// Busca el archivo de `class` sin cargarlo.
    pub fn locate(&self, class: &str) -> Option<PathBuf> {
        if !is_valid_class_name(class, self.options.separator) {
            log::warn!("Nombre de clase no válido: '{}'", class);
            return None;
        }

        let path = self.candidate_path(class);
        self.paths
            .iter()
            .filter_map(|entry| self.candidate_for(entry, &path))
            .find(|candidate| {
                log::debug!("Probando {:?}", candidate);
                candidate.is_file()
            })
    }

    /// Carga `class` a través de `host`. `Ok(false)` significa "no encontrada".
    pub fn autoload(&self, class: &str, host: &mut dyn ClassHost) -> Result<bool, ResolverError> {
        if host.class_exists(class) {
            return Ok(true);
        }

        match self.locate(class) {
            Some(file) => {
                host.include_class(class, &file)?;
                Ok(true)
            }
            None => {
                log::debug!("La clase '{}' no está en ninguna ruta de búsqueda.", class);
                Ok(false)
            }
        }
    }

    fn make_entry(&self, base: PathBuf, namespace: &str) -> PathEntry {
        if namespace.is_empty() {
            PathEntry::Plain(base)
        } else {
            PathEntry::Namespaced {
                base,
                prefix: namespace.replace(self.options.separator, "/"),
            }
        }
    }

    /// `base/ruta`, o `None` si la ruta relativa intenta salir de `base`.
    fn candidate_for(&self, entry: &PathEntry, path: &str) -> Option<PathBuf> {
        match entry {
            PathEntry::Plain(_) => join_relative(entry.base(), path),
            PathEntry::Namespaced { prefix, .. } => join_relative(
                entry.base(),
                &strip_prefix(path, prefix, self.options.prefix_strip),
            ),
        }
    }
}

impl Autoload for ClassResolver {
    fn autoload(&self, class: &str, host: &mut dyn ClassHost) -> Result<bool, ResolverError> {
        ClassResolver::autoload(self, class, host)
    }
}

/// Registra `resolver` como cargador de `runtime` y devuelve el handle
/// compartido para poder seguir añadiendo rutas después.
pub fn register(runtime: &mut Runtime, resolver: ClassResolver) -> SharedResolver {
    let shared = Rc::new(RefCell::new(resolver));
    runtime.register_autoloader(shared.clone(), false);
    shared
}

fn strip_prefix(path: &str, prefix: &str, mode: PrefixStrip) -> String {
    let needle = format!("{}/", prefix);
    match mode {
        PrefixStrip::FirstOccurrence => path.replacen(&needle, "", 1),
        PrefixStrip::Anchored => path.strip_prefix(&needle).unwrap_or(path).to_string(),
    }
}

// Los segmentos vacíos (`_Foo`, `NS__Foo`) se ignoran, igual que `B//Foo.php`.
fn join_relative(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut full = base.to_path_buf();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => full.push(segment),
            _ => return None,
        }
    }
    Some(full)
}

// `/` y `\` solo se admiten cuando son el separador de espacios de nombres.
fn is_valid_class_name(class: &str, separator: char) -> bool {
    !class.is_empty()
        && !class.contains('\0')
        && !class
            .chars()
            .any(|c| (c == '/' || c == '\\') && c != separator)
}
