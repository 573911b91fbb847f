use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;

use crate::error::Result;

/// Entry count for one entry type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub entry_type_id: i64,
    pub name: String,
    pub entries: u64,
}

/// Response from [`journal_stats`].
#[derive(Debug, Serialize)]
pub struct JournalStats {
    pub total_entries: u64,
    pub labeled_entries: u64,
    /// Every entry type, including ones with no entries, in display order.
    pub by_type: Vec<TypeCount>,
    pub db_size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_entry: Option<String>,
}

/// Compute journal statistics.
///
/// `db_path` is used for file size calculation; pass None for in-memory databases.
pub fn journal_stats(conn: &Connection, db_path: Option<&Path>) -> Result<JournalStats> {
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))?;
    let labeled: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT entry_id) FROM entry_label",
        [],
        |row| row.get(0),
    )?;
    let (oldest, newest): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM entry",
        params![],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let db_size_bytes = db_path
        .and_then(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .unwrap_or(0);

    Ok(JournalStats {
        total_entries: total as u64,
        labeled_entries: labeled as u64,
        by_type: count_by_type(conn)?,
        db_size_bytes,
        oldest_entry: oldest,
        newest_entry: newest,
    })
}

fn count_by_type(conn: &Connection) -> Result<Vec<TypeCount>> {
    let mut stmt = conn.prepare(
        "SELECT et.id, et.name, COUNT(e.id) FROM entry_type et \
         LEFT JOIN entry e ON e.entry_type_id = et.id \
         GROUP BY et.id ORDER BY et.sort_order, et.id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TypeCount {
                entry_type_id: row.get(0)?,
                name: row.get(1)?,
                entries: row.get::<_, i64>(2)? as u64,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
