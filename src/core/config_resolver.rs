// src/core/config_resolver.rs

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config as global_paths;
use crate::constants::{CONFIG_FILENAME, DEFAULT_INCLUDE_PATH};
use crate::core::resolver::ClassResolver;
use crate::models::ClasspathConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No se pudo leer el archivo de configuración {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error al parsear TOML en {path:?}: {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("El archivo de configuración indicado no existe: {0:?}")]
    ConfigNotFound(PathBuf),
    #[error("Entrada de ruta no válida '{0}': se esperaba DIR o DIR=NAMESPACE.")]
    InvalidEntry(String),
}

type ConfigResult<T> = Result<T, ConfigError>;

/// Una ruta pasada por línea de comandos, `DIR` o `DIR=NAMESPACE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    pub path: PathBuf,
    pub namespace: String,
}

impl std::str::FromStr for PathSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, namespace) = s.split_once('=').unwrap_or((s, ""));
        if path.is_empty() {
            return Err(ConfigError::InvalidEntry(s.to_string()));
        }
        Ok(Self {
            path: PathBuf::from(path),
            namespace: namespace.to_string(),
        })
    }
}

/// Fuentes de configuración ya leídas del entorno y de la línea de comandos.
#[derive(Debug, Default)]
pub struct ResolverSources {
    pub include_path: Option<String>,
    pub env_include_path: Option<String>,
    pub add: Vec<PathSpec>,
    pub prepend: Vec<PathSpec>,
}

/// Carga `classpath.toml`: el indicado explícitamente, el del directorio
/// actual o el global, en ese orden. Si no hay ninguno, configuración vacía.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> ConfigResult<ClasspathConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }
        return read_config(path);
    }

    let local = cwd.join(CONFIG_FILENAME);
    if local.is_file() {
        return read_config(&local);
    }

    match global_paths::get_config_file_path() {
        Some(global) if global.is_file() => read_config(&global),
        _ => {
            log::debug!("Sin archivo de configuración, usando valores por defecto.");
            Ok(ClasspathConfig::default())
        }
    }
}

fn read_config(path: &Path) -> ConfigResult<ClasspathConfig> {
    log::info!("Cargando configuración desde: {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Construye el resolvedor fusionando el archivo de configuración con el
/// entorno y la línea de comandos. La línea de comandos siempre tiene prioridad.
pub fn build_resolver(config: &ClasspathConfig, sources: &ResolverSources) -> ClassResolver {
    let include_path = sources
        .include_path
        .as_deref()
        .or(sources.env_include_path.as_deref())
        .or(config.include_path.as_deref())
        .unwrap_or_else(|| {
            log::warn!(
                "No hay include path configurado. Se usa '{}'.",
                DEFAULT_INCLUDE_PATH
            );
            DEFAULT_INCLUDE_PATH
        });

    let mut resolver = ClassResolver::from_include_path(include_path, config.resolver_options());

    for entry in &config.paths {
        resolver.add_path(&entry.path, &entry.namespace, entry.prepend);
    }
    for spec in &sources.add {
        resolver.add_path(&spec.path, &spec.namespace, false);
    }
    for spec in &sources.prepend {
        resolver.prepend_path(&spec.path, &spec.namespace);
    }

    resolver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PathConfig, PathEntry};
    use pretty_assertions::assert_eq;

    #[test]
    fn path_spec_parses_namespace() {
        let spec: PathSpec = "lib=Acme_Util".parse().unwrap();
        assert_eq!(spec.path, PathBuf::from("lib"));
        assert_eq!(spec.namespace, "Acme_Util");

        let plain: PathSpec = "lib".parse().unwrap();
        assert_eq!(plain.namespace, "");

        assert!("=Acme".parse::<PathSpec>().is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigNotFound(_)));
    }

    #[test]
    fn local_config_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "include_path = \"lib\"").unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.include_path.as_deref(), Some("lib"));
    }

    #[test]
    fn malformed_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILENAME);
        fs::write(&file, "include_path = [").unwrap();
        let err = load_config(Some(&file), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { path, .. } if path == file));
    }

    #[test]
    fn cli_include_path_wins_over_env_and_file() {
        let config = ClasspathConfig {
            include_path: Some("from-file".to_string()),
            ..Default::default()
        };
        let sources = ResolverSources {
            include_path: Some("from-cli".to_string()),
            env_include_path: Some("from-env".to_string()),
            ..Default::default()
        };
        let resolver = build_resolver(&config, &sources);
        assert_eq!(
            resolver.entries(),
            &[PathEntry::Plain(PathBuf::from("from-cli"))]
        );

        let env_only = ResolverSources {
            env_include_path: Some("from-env".to_string()),
            ..Default::default()
        };
        let resolver = build_resolver(&config, &env_only);
        assert_eq!(
            resolver.entries(),
            &[PathEntry::Plain(PathBuf::from("from-env"))]
        );
    }

    #[test]
    fn defaults_to_current_directory() {
        let resolver = build_resolver(&ClasspathConfig::default(), &ResolverSources::default());
        assert_eq!(resolver.entries(), &[PathEntry::Plain(PathBuf::from("."))]);
    }

    #[test]
    fn configured_and_cli_paths_are_merged_in_order() {
        let config = ClasspathConfig {
            include_path: Some("base".to_string()),
            paths: vec![
                PathConfig {
                    path: PathBuf::from("src"),
                    namespace: "Acme".to_string(),
                    prepend: false,
                },
                PathConfig {
                    path: PathBuf::from("first"),
                    namespace: String::new(),
                    prepend: true,
                },
            ],
            ..Default::default()
        };
        let sources = ResolverSources {
            add: vec!["extra".parse().unwrap()],
            prepend: vec!["top=Top_Ns".parse().unwrap()],
            ..Default::default()
        };
        let resolver = build_resolver(&config, &sources);
        assert_eq!(
            resolver.entries(),
            &[
                PathEntry::Namespaced {
                    base: PathBuf::from("top"),
                    prefix: "Top/Ns".to_string()
                },
                PathEntry::Plain(PathBuf::from("first")),
                PathEntry::Plain(PathBuf::from("base")),
                PathEntry::Namespaced {
                    base: PathBuf::from("src"),
                    prefix: "Acme".to_string()
                },
                PathEntry::Plain(PathBuf::from("extra")),
            ]
        );
    }
}
