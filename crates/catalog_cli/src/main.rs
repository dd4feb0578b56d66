//! CLI probe for the catalog core.
//!
//! # Responsibility
//! - Verify `catalog_core` linkage and store bootstrap from the command line.
//! - Print a deterministic summary of the configured store.
//!
//! Configuration comes from `CATALOG_DB_PATH`, `CATALOG_LOG_LEVEL` and
//! `CATALOG_LOG_DIR`.

use catalog_core::db::{open_db, open_db_in_memory};
use catalog_core::{
    init_logging, CatalogConfig, Dish, Menu, RecordRepository, RepoResult, Restaurant, SqlRecord,
    SqliteRecordRepository,
};
use rusqlite::Connection;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("catalog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CatalogConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    println!("catalog_core ping={}", catalog_core::ping());
    println!("catalog_core version={}", catalog_core::core_version());

    let conn = match config.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    println!("restaurants={}", count::<Restaurant>(&conn)?);
    println!("dishes={}", count::<Dish>(&conn)?);
    println!("menus={}", count::<Menu>(&conn)?);
    Ok(())
}

fn count<E: SqlRecord>(conn: &Connection) -> RepoResult<usize> {
    let repo = SqliteRecordRepository::<E>::try_new(conn)?;
    Ok(repo.find_all()?.len())
}
