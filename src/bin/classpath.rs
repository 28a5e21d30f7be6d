// src/bin/classpath.rs

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::{env, fs};

use classpath::cli::{Action, Cli};
use classpath::constants::{CLASS_FILE_EXTENSION, DEMO_CLASS_NAME, INCLUDE_PATH_ENV};
use classpath::core::config_resolver::{self, ResolverSources};
use classpath::core::resolver::{self, ClassResolver};
use classpath::system::runtime::{Runtime, RuntimeError};

/// El punto de entrada principal de la aplicación.
fn main() {
    // Para ver los logs, ejecuta con `RUST_LOG=debug classpath ...`
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        eprintln!("\nError: {:?}", e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let cwd = env::current_dir().context("No se pudo obtener el directorio actual.")?;
    let config = config_resolver::load_config(cli.config.as_deref(), &cwd)?;
    let sources = ResolverSources {
        include_path: cli.include_path,
        env_include_path: env::var(INCLUDE_PATH_ENV).ok(),
        add: cli.add,
        prepend: cli.prepend,
    };
    let class_resolver = config_resolver::build_resolver(&config, &sources);

    match cli.command {
        Action::Paths => handle_paths(&class_resolver),
        Action::Locate { class } => handle_locate(&class_resolver, &class),
        Action::Resolve { classes } => handle_resolve(class_resolver, &classes),
        Action::Demo => handle_demo(class_resolver),
    }
}

/// Lista las rutas de búsqueda en orden de prioridad.
fn handle_paths(class_resolver: &ClassResolver) -> Result<()> {
    if class_resolver.entries().is_empty() {
        println!("(sin rutas de búsqueda)");
        return Ok(());
    }
    for (i, entry) in class_resolver.entries().iter().enumerate() {
        println!("{:>3}. {}", i + 1, entry);
    }
    Ok(())
}

fn handle_locate(class_resolver: &ClassResolver, class: &str) -> Result<()> {
    let file = class_resolver.locate(class).ok_or_else(|| {
        anyhow!(
            "Clase '{}' no encontrada (buscando '{}').",
            class,
            class_resolver.candidate_path(class)
        )
    })?;
    println!("{}", file.display());
    Ok(())
}

fn handle_resolve(class_resolver: ClassResolver, classes: &[String]) -> Result<()> {
    let mut runtime = Runtime::new();
    resolver::register(&mut runtime, class_resolver);

    for class in classes {
        runtime
            .require_class(class)
            .with_context(|| format!("No se pudo cargar la clase '{}'", class))?;
        let file = runtime
            .symbols()
            .class_file(class)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("✔ {} -> {}", class, file);
    }
    Ok(())
}

/// Escribe `Dummy.php` en el directorio actual, lo carga y lo borra.
fn handle_demo(mut class_resolver: ClassResolver) -> Result<()> {
    let cwd = env::current_dir()?;
    let file = cwd.join(format!("{}{}", DEMO_CLASS_NAME, CLASS_FILE_EXTENSION));
    let source = format!(
        "<?php\nclass {name} {{\n    function hello() {{\n        echo __CLASS__, ' was autoloaded', PHP_EOL;\n    }}\n}}\n",
        name = DEMO_CLASS_NAME
    );
    fs::write(&file, source)
        .with_context(|| format!("No se pudo escribir {:?} (¿permiso de escritura?)", file))?;

    class_resolver.prepend_path(&cwd, "");
    let mut runtime = Runtime::new();
    resolver::register(&mut runtime, class_resolver);

    let result = runtime.require_class(DEMO_CLASS_NAME);

    // Borrar siempre, incluso si la carga falló.
    if let Err(e) = fs::remove_file(&file) {
        log::warn!("No se pudo borrar {:?}: {}", file, e);
    }

    match result {
        Ok(()) => {
            println!("{} was autoloaded", DEMO_CLASS_NAME);
            Ok(())
        }
        Err(RuntimeError::ClassNotFound { name }) => {
            Err(anyhow!("La demo no pudo encontrar '{}' en {:?}", name, cwd))
        }
        Err(e) => Err(e.into()),
    }
}
