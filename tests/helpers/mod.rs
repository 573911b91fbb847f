#![allow(dead_code)]

use haven::db;
use haven::seed::{self, data};
use rusqlite::{params, Connection};

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&mut conn).unwrap();
    conn
}

/// In-memory database with the full bundled release applied.
pub fn seeded_db() -> Connection {
    let mut conn = test_db();
    seed::apply_seed(&mut conn, &data::SEED, 0).unwrap();
    conn
}

/// Insert an entry and its label links directly. Returns the entry id.
pub fn insert_entry(conn: &Connection, entry_type_id: i64, timestamp: &str, label_ids: &[i64]) -> i64 {
    conn.execute(
        "INSERT INTO entry (entry_type_id, timestamp, created_at) VALUES (?1, ?2, ?2)",
        params![entry_type_id, timestamp],
    )
    .unwrap();
    let id = conn.last_insert_rowid();
    for label_id in label_ids {
        conn.execute(
            "INSERT INTO entry_label (entry_id, label_id) VALUES (?1, ?2)",
            params![id, label_id],
        )
        .unwrap();
    }
    id
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
