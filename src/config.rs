// src/config.rs

use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILENAME};

/// Devuelve la ruta al directorio de configuración global de classpath.
/// A diferencia de otros directorios, no se crea: solo se lee.
pub fn get_config_dir() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join(CONFIG_DIR_NAME);
    log::debug!("Directorio de config: {:?}", config_path);
    Some(config_path)
}

/// Devuelve la ruta al archivo classpath.toml global.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
