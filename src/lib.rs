// src/lib.rs

//! Cargador de clases por rutas de búsqueda para runtimes estilo PHP.
//!
//! Un nombre como `Acme_Util_Foo` se traduce a `Acme/Util/Foo.php` y se busca
//! en una lista ordenada de directorios base; la primera coincidencia gana.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

pub use crate::core::resolver::{ClassResolver, ResolverError, SharedResolver, register};
pub use crate::models::{PathEntry, PrefixStrip, ResolverOptions};
pub use crate::system::runtime::{ClassHost, Runtime, RuntimeError, SymbolTable};
