// src/constants.rs

/// Extensión de archivo que se añade al nombre de clase para formar la ruta candidata.
pub const CLASS_FILE_EXTENSION: &str = ".php";

/// Separador de espacios de nombres dentro de un nombre de clase (`Foo_Bar` -> `Foo/Bar`).
pub const NAMESPACE_SEPARATOR: char = '_';

/// Variable de entorno con la lista de rutas de búsqueda inicial.
pub const INCLUDE_PATH_ENV: &str = "CLASSPATH_INCLUDE_PATH";

/// Ruta de búsqueda por defecto cuando nadie configura ninguna.
pub const DEFAULT_INCLUDE_PATH: &str = ".";

/// El nombre del directorio de configuración global (en ~/.config/).
pub const CONFIG_DIR_NAME: &str = "classpath";

/// El nombre del archivo de configuración, tanto local como global.
pub const CONFIG_FILENAME: &str = "classpath.toml";

/// Nombre de la clase que escribe y carga el comando `demo`.
pub const DEMO_CLASS_NAME: &str = "Dummy";
