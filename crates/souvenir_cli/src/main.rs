//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `souvenir_core` linkage and catalog file access.
//! - Print every manufacturer with its souvenirs in catalog order.
//!
//! Usage: `souvenir_cli [catalog-path] [--log-dir <dir>]`. The log directory
//! may also come from `SOUVENIR_LOG_DIR` and must be absolute.

use clap::Parser;
use souvenir_core::{
    default_log_level, init_logging, CatalogService, FileCatalogStore, DEFAULT_CATALOG_FILE_NAME,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "souvenir_cli")]
#[command(about = "Print the contents of a souvenir catalog file.")]
struct CommandLine {
    /// Catalog file to open; created empty when missing
    #[arg(default_value = DEFAULT_CATALOG_FILE_NAME)]
    path: String,
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "SOUVENIR_LOG_DIR")]
    log_dir: Option<String>,
    /// Log level passed to the logger
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
}

fn main() -> ExitCode {
    let CommandLine {
        path,
        log_dir,
        log_level,
    } = CommandLine::parse();

    if let Some(log_dir) = log_dir {
        if let Err(err) = init_logging(&log_level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = match FileCatalogStore::open(&path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("cannot open catalog `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("souvenir_core version={}", souvenir_core::core_version());
    println!("catalog={}", store.path().display());

    let catalog = CatalogService::new(store).list_catalog();
    if catalog.is_empty() {
        println!("(empty)");
    }
    for manufacturer in catalog.manufacturers() {
        println!("{manufacturer}");
        for souvenir in manufacturer.souvenirs() {
            println!("\t{souvenir}");
        }
    }
    log::info!(
        "event=cli_list module=cli status=ok manufacturers={}",
        catalog.len()
    );
    ExitCode::SUCCESS
}
