// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config_resolver::PathSpec;

#[derive(Parser, Debug)]
#[command(author, version, about = "classpath: resuelve y carga clases desde rutas de búsqueda.", long_about = None)]
pub struct Cli {
    /// Archivo de configuración (por defecto ./classpath.toml o el global).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Lista de rutas separada por el separador de la plataforma. Sustituye a CLASSPATH_INCLUDE_PATH.
    #[arg(long, global = true)]
    pub include_path: Option<String>,

    /// Añade una ruta al final: DIR o DIR=NAMESPACE. Repetible.
    #[arg(long = "add", value_name = "DIR[=NS]", global = true)]
    pub add: Vec<PathSpec>,

    /// Añade una ruta al principio: DIR o DIR=NAMESPACE. Repetible.
    #[arg(long = "prepend", value_name = "DIR[=NS]", global = true)]
    pub prepend: Vec<PathSpec>,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Muestra las rutas de búsqueda en orden de prioridad.
    Paths,
    /// Muestra el archivo que define una clase, sin cargarlo.
    Locate { class: String },
    /// Carga una o varias clases.
    Resolve {
        #[arg(required = true)]
        classes: Vec<String>,
    },
    /// Escribe una clase de prueba en el directorio actual, la carga y la borra.
    Demo,
}
