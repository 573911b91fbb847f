//! SQL DDL for the reference and journal tables.
//!
//! Reference tables (`measurement_type`, `category`, `entry_type`, `label`,
//! `tag`, `label_tag`) are filled by the seed migrator. Journal tables
//! (`entry`, `entry_label`) are append-only and written by the labeling
//! workflow. All DDL uses `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS measurement_type (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    display_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS category (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS entry_type (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    measurement_type_id INTEGER NOT NULL REFERENCES measurement_type(id),
    prompt TEXT,
    icon TEXT,
    is_enabled INTEGER NOT NULL DEFAULT 1,
    is_default INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_entry_type_measurement ON entry_type(measurement_type_id);

CREATE TABLE IF NOT EXISTS label (
    id INTEGER PRIMARY KEY,
    entry_type_id INTEGER NOT NULL REFERENCES entry_type(id),
    name TEXT NOT NULL,
    parent_id INTEGER REFERENCES label(id),
    category_id INTEGER REFERENCES category(id),
    is_default INTEGER NOT NULL DEFAULT 1,
    is_enabled INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0,
    seed_version INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_label_entry_type ON label(entry_type_id);
CREATE INDEX IF NOT EXISTS idx_label_parent ON label(parent_id);
CREATE INDEX IF NOT EXISTS idx_label_category ON label(category_id);

CREATE TABLE IF NOT EXISTS tag (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    tag_group TEXT NOT NULL,
    seed_version INTEGER NOT NULL DEFAULT 1,
    UNIQUE(name, tag_group)
);

CREATE TABLE IF NOT EXISTS label_tag (
    label_id INTEGER NOT NULL REFERENCES label(id),
    tag_id INTEGER NOT NULL REFERENCES tag(id),
    seed_version INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (label_id, tag_id)
);

CREATE INDEX IF NOT EXISTS idx_label_tag_tag ON label_tag(tag_id);

-- Journal
CREATE TABLE IF NOT EXISTS entry (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_type_id INTEGER NOT NULL REFERENCES entry_type(id),
    source_type TEXT NOT NULL DEFAULT 'log',
    timestamp TEXT NOT NULL,
    created_at TEXT NOT NULL,
    numeric_value REAL,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_entry_type ON entry(entry_type_id);
CREATE INDEX IF NOT EXISTS idx_entry_timestamp ON entry(timestamp);
CREATE INDEX IF NOT EXISTS idx_entry_source_type ON entry(source_type);

CREATE TABLE IF NOT EXISTS entry_label (
    entry_id INTEGER NOT NULL REFERENCES entry(id) ON DELETE CASCADE,
    label_id INTEGER NOT NULL REFERENCES label(id),
    PRIMARY KEY (entry_id, label_id)
);

CREATE INDEX IF NOT EXISTS idx_entry_label_label ON entry_label(label_id);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        for expected in [
            "measurement_type",
            "category",
            "entry_type",
            "label",
            "tag",
            "label_tag",
            "entry",
            "entry_label",
            "schema_meta",
        ] {
            assert!(tables.contains(&expected.to_string()), "{expected} missing");
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }

    #[test]
    fn entry_label_cascades_on_entry_delete() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        init_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO measurement_type (id, name, display_name) VALUES (1, 'label_select', 'Pick');
             INSERT INTO entry_type (id, name, measurement_type_id) VALUES (1, 'Food', 1);
             INSERT INTO label (id, entry_type_id, name) VALUES (1, 1, 'Cheese');
             INSERT INTO entry (id, entry_type_id, timestamp, created_at)
                 VALUES (1, 1, '2026-02-14T08:00:00-05:00', '2026-02-14T08:00:00-05:00');
             INSERT INTO entry_label (entry_id, label_id) VALUES (1, 1);
             DELETE FROM entry WHERE id = 1;",
        )
        .unwrap();

        let links: i64 = conn
            .query_row("SELECT COUNT(*) FROM entry_label", [], |r| r.get(0))
            .unwrap();
        assert_eq!(links, 0);
    }

    #[test]
    fn label_requires_existing_entry_type() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        init_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO label (id, entry_type_id, name) VALUES (1, 99, 'Orphan')",
            [],
        );
        assert!(result.is_err(), "foreign key should reject unknown entry type");
    }
}
