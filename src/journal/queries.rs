//! Read-side queries over the reference tables and the journal.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{EntryType, EntryWithDetails, Label, Tag};
use crate::error::Result;

const ENTRY_TYPE_COLUMNS: &str =
    "id, name, measurement_type_id, prompt, icon, is_enabled, is_default, sort_order";

const LABEL_COLUMNS: &str =
    "id, entry_type_id, name, parent_id, category_id, is_default, is_enabled, sort_order, seed_version";

/// Feed projection: entry, its type, and comma-joined label names.
const ENTRY_DETAILS_SELECT: &str = "\
    SELECT e.id, e.entry_type_id, et.name, et.icon, e.source_type, e.timestamp, \
           e.created_at, e.numeric_value, e.notes, \
           (SELECT GROUP_CONCAT(l.name, ', ') \
              FROM entry_label el JOIN label l ON l.id = el.label_id \
             WHERE el.entry_id = e.id) AS label_names \
    FROM entry e \
    JOIN entry_type et ON et.id = e.entry_type_id";

fn entry_type_from_row(row: &Row<'_>) -> rusqlite::Result<EntryType> {
    Ok(EntryType {
        id: row.get(0)?,
        name: row.get(1)?,
        measurement_type_id: row.get(2)?,
        prompt: row.get(3)?,
        icon: row.get(4)?,
        is_enabled: row.get(5)?,
        is_default: row.get(6)?,
        sort_order: row.get(7)?,
    })
}

fn label_from_row(row: &Row<'_>) -> rusqlite::Result<Label> {
    Ok(Label {
        id: row.get(0)?,
        entry_type_id: row.get(1)?,
        name: row.get(2)?,
        parent_id: row.get(3)?,
        category_id: row.get(4)?,
        is_default: row.get(5)?,
        is_enabled: row.get(6)?,
        sort_order: row.get(7)?,
        seed_version: row.get(8)?,
    })
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<EntryWithDetails> {
    Ok(EntryWithDetails {
        id: row.get(0)?,
        entry_type_id: row.get(1)?,
        entry_type_name: row.get(2)?,
        entry_type_icon: row.get(3)?,
        source_type: row.get(4)?,
        timestamp: row.get(5)?,
        created_at: row.get(6)?,
        numeric_value: row.get(7)?,
        notes: row.get(8)?,
        label_names: row.get(9)?,
    })
}

/// Enabled entry types in display order.
pub fn enabled_entry_types(conn: &Connection) -> Result<Vec<EntryType>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_TYPE_COLUMNS} FROM entry_type WHERE is_enabled = 1 ORDER BY sort_order, id"
    ))?;
    let types = stmt
        .query_map([], entry_type_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(types)
}

pub fn entry_type_by_id(conn: &Connection, id: i64) -> Result<Option<EntryType>> {
    let entry_type = conn
        .query_row(
            &format!("SELECT {ENTRY_TYPE_COLUMNS} FROM entry_type WHERE id = ?1"),
            params![id],
            entry_type_from_row,
        )
        .optional()?;
    Ok(entry_type)
}

/// Case-insensitive lookup by name.
pub fn entry_type_by_name(conn: &Connection, name: &str) -> Result<Option<EntryType>> {
    let entry_type = conn
        .query_row(
            &format!("SELECT {ENTRY_TYPE_COLUMNS} FROM entry_type WHERE name = ?1 COLLATE NOCASE"),
            params![name],
            entry_type_from_row,
        )
        .optional()?;
    Ok(entry_type)
}

/// All enabled labels of an entry type (roots and children) in sort order.
pub fn labels_for_entry_type(conn: &Connection, entry_type_id: i64) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LABEL_COLUMNS} FROM label \
         WHERE entry_type_id = ?1 AND is_enabled = 1 ORDER BY sort_order, id"
    ))?;
    let labels = stmt
        .query_map(params![entry_type_id], label_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels)
}

/// Root labels only (no parent).
pub fn top_level_labels(conn: &Connection, entry_type_id: i64) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LABEL_COLUMNS} FROM label \
         WHERE entry_type_id = ?1 AND parent_id IS NULL AND is_enabled = 1 ORDER BY sort_order, id"
    ))?;
    let labels = stmt
        .query_map(params![entry_type_id], label_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels)
}

pub fn child_labels(conn: &Connection, parent_id: i64) -> Result<Vec<Label>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LABEL_COLUMNS} FROM label \
         WHERE parent_id = ?1 AND is_enabled = 1 ORDER BY sort_order, id"
    ))?;
    let labels = stmt
        .query_map(params![parent_id], label_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels)
}

pub fn tags_by_group(conn: &Connection, group: &str) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, tag_group, seed_version FROM tag WHERE tag_group = ?1 ORDER BY id",
    )?;
    let tags = stmt
        .query_map(params![group], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
                tag_group: row.get(2)?,
                seed_version: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tags)
}

/// One page of the feed, newest first, optionally restricted to one entry type.
pub fn entries_page(
    conn: &Connection,
    entry_type_id: Option<i64>,
    limit: usize,
    offset: usize,
) -> Result<Vec<EntryWithDetails>> {
    let (where_clause, param) = type_filter(entry_type_id);
    let sql = format!(
        "{ENTRY_DETAILS_SELECT} {where_clause} ORDER BY e.timestamp DESC, e.id DESC LIMIT ?{} OFFSET ?{}",
        if param.is_some() { 2 } else { 1 },
        if param.is_some() { 3 } else { 2 },
    );

    let mut stmt = conn.prepare(&sql)?;
    let limit = limit as i64;
    let offset = offset as i64;
    let entries = if let Some(id) = param {
        stmt.query_map(params![id, limit, offset], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?
    } else {
        stmt.query_map(params![limit, offset], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok(entries)
}

pub fn entry_by_id(conn: &Connection, entry_id: i64) -> Result<Option<EntryWithDetails>> {
    let entry = conn
        .query_row(
            &format!("{ENTRY_DETAILS_SELECT} WHERE e.id = ?1"),
            params![entry_id],
            entry_from_row,
        )
        .optional()?;
    Ok(entry)
}

/// Entries whose timestamp lies in `[start, end]` (inclusive, string comparison).
pub fn entries_in_range(conn: &Connection, start: &str, end: &str) -> Result<Vec<EntryWithDetails>> {
    let mut stmt = conn.prepare(&format!(
        "{ENTRY_DETAILS_SELECT} WHERE e.timestamp BETWEEN ?1 AND ?2 ORDER BY e.timestamp DESC, e.id DESC"
    ))?;
    let entries = stmt
        .query_map(params![start, end], entry_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Sum of numeric values for an entry type in `[day_start, day_end]`; 0 when empty.
pub fn daily_total(conn: &Connection, entry_type_id: i64, day_start: &str, day_end: &str) -> Result<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(numeric_value), 0.0) FROM entry \
         WHERE entry_type_id = ?1 AND timestamp BETWEEN ?2 AND ?3",
        params![entry_type_id, day_start, day_end],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// WHERE clause for the optional entry-type filter.
fn type_filter(entry_type_id: Option<i64>) -> (&'static str, Option<i64>) {
    match entry_type_id {
        Some(id) => ("WHERE e.entry_type_id = ?1", Some(id)),
        None => ("", None),
    }
}
