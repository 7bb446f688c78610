//! Key/value rows in the `ui_state` table.

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::AppResult;

pub fn get_state(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row("SELECT value FROM ui_state WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?)
}

pub fn set_state(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO ui_state (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Returns whether a row was removed.
pub fn delete_state(conn: &Connection, key: &str) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM ui_state WHERE key = ?1", [key])? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::open_in_memory;

    #[test]
    fn set_overwrites_and_delete_removes() {
        let pool = open_in_memory().unwrap();
        assert_eq!(get_state(&pool.conn, "k").unwrap(), None);
        set_state(&pool.conn, "k", "a").unwrap();
        set_state(&pool.conn, "k", "b").unwrap();
        assert_eq!(get_state(&pool.conn, "k").unwrap().as_deref(), Some("b"));
        assert!(delete_state(&pool.conn, "k").unwrap());
        assert!(!delete_state(&pool.conn, "k").unwrap());
    }
}
