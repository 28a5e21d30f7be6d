// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{CLASS_FILE_EXTENSION, NAMESPACE_SEPARATOR};

// --- MODELOS DE RUTAS DE BÚSQUEDA ---

/// Una entrada de la lista de rutas de búsqueda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEntry {
    /// Directorio base sin espacio de nombres.
    Plain(PathBuf),
    /// Directorio base cuyo prefijo (ya normalizado a `Foo/Bar`) se elimina
    /// de la ruta candidata antes de comprobarla.
    Namespaced { base: PathBuf, prefix: String },
}

impl PathEntry {
    pub fn base(&self) -> &Path {
        match self {
            PathEntry::Plain(base) => base,
            PathEntry::Namespaced { base, .. } => base,
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        match self {
            PathEntry::Plain(_) => None,
            PathEntry::Namespaced { prefix, .. } => Some(prefix),
        }
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEntry::Plain(base) => write!(f, "{}", base.display()),
            PathEntry::Namespaced { base, prefix } => {
                write!(f, "{} (ns: {})", base.display(), prefix)
            }
        }
    }
}

/// Cómo se elimina el prefijo de una entrada con espacio de nombres.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixStrip {
    /// Elimina la primera aparición de `prefijo/` en cualquier posición.
    #[default]
    FirstOccurrence,
    /// Solo elimina `prefijo/` si la ruta empieza por él.
    Anchored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub extension: String,
    pub separator: char,
    pub prefix_strip: PrefixStrip,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            extension: CLASS_FILE_EXTENSION.to_string(),
            separator: NAMESPACE_SEPARATOR,
            prefix_strip: PrefixStrip::default(),
        }
    }
}

// --- MODELOS DE `classpath.toml` ---

/// Una ruta adicional declarada en la sección `[[paths]]`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub prepend: bool,
}

/// Representa la estructura deserializada de un archivo `classpath.toml`.
/// Todos los campos son opcionales.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClasspathConfig {
    pub include_path: Option<String>,
    pub extension: Option<String>,
    pub namespace_separator: Option<char>,
    #[serde(default)]
    pub prefix_strip: PrefixStrip,
    #[serde(default)]
    pub paths: Vec<PathConfig>,
}

impl ClasspathConfig {
    pub fn resolver_options(&self) -> ResolverOptions {
        let defaults = ResolverOptions::default();
        ResolverOptions {
            extension: self.extension.clone().unwrap_or(defaults.extension),
            separator: self.namespace_separator.unwrap_or(defaults.separator),
            prefix_strip: self.prefix_strip,
        }
    }
}
