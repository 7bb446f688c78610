use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    for table in ["query_cache", "ui_state", "log"] {
        println!(
            "{}• {}:{} {}{}{} rows",
            CYAN,
            table,
            RESET,
            GREEN,
            count(pool, table)?,
            RESET
        );
    }

    //
    // 3) SCHEMA VERSION
    //
    let versions = applied_versions(&pool.conn)?;
    let latest = versions
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Schema:{} {} ({} migrations)", CYAN, RESET, latest, versions.len());

    //
    // 4) LAST CACHE FETCH
    //
    let last_fetch: Option<String> = pool
        .conn
        .query_row(
            "SELECT fetched_at FROM query_cache ORDER BY fetched_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    println!(
        "{}• Last fetch:{} {}",
        CYAN,
        RESET,
        last_fetch.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}

/// `PRAGMA integrity_check`; returns the reported lines ("ok" when healthy).
pub fn integrity_check(pool: &DbPool) -> rusqlite::Result<Vec<String>> {
    let mut stmt = pool.conn.prepare("PRAGMA integrity_check")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

pub fn vacuum(pool: &DbPool) -> rusqlite::Result<()> {
    pool.conn.execute_batch("VACUUM;")
}
