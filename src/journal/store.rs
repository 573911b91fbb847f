//! Atomic entry writes.

use rusqlite::{params, Connection};

use super::time::{normalize_timestamp, now_timestamp};
use super::types::{NewEntry, SOURCE_LOG};
use crate::error::{HavenError, Result};

/// Persist an entry with all of its label links in one transaction.
///
/// Fails with [`HavenError::NothingToSave`] before touching the database when
/// the request has no content labels and no numeric value. Any failure while
/// linking labels (for example an unknown label id) rolls the entry back.
/// A supplied timestamp must be RFC 3339 with an offset and is stored in
/// fixed-width form.
pub fn save_entry(conn: &mut Connection, entry: &NewEntry) -> Result<i64> {
    validate(entry)?;

    let timestamp = match entry.timestamp.as_deref() {
        Some(raw) => normalize_timestamp(raw).ok_or_else(|| {
            HavenError::InvalidInput(format!("timestamp must be RFC 3339 with an offset, got {raw:?}"))
        })?,
        None => now_timestamp(),
    };
    let created_at = now_timestamp();
    let notes = entry
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let label_ids = merged_label_ids(entry);

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO entry (entry_type_id, source_type, timestamp, created_at, numeric_value, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![entry.entry_type_id, SOURCE_LOG, timestamp, created_at, entry.numeric_value, notes],
    )?;
    let entry_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare("INSERT INTO entry_label (entry_id, label_id) VALUES (?1, ?2)")?;
        for label_id in &label_ids {
            stmt.execute(params![entry_id, label_id])?;
        }
    }

    tx.commit()?;

    tracing::info!(
        entry_id,
        entry_type_id = entry.entry_type_id,
        labels = label_ids.len(),
        "entry saved"
    );
    Ok(entry_id)
}

/// Show or hide an entry type.
pub fn set_entry_type_enabled(conn: &Connection, entry_type_id: i64, enabled: bool) -> Result<()> {
    let updated = conn.execute(
        "UPDATE entry_type SET is_enabled = ?1 WHERE id = ?2",
        params![enabled, entry_type_id],
    )?;
    if updated == 0 {
        return Err(HavenError::NotFound(format!("entry type {entry_type_id}")));
    }
    tracing::info!(entry_type_id, enabled, "entry type visibility changed");
    Ok(())
}

fn validate(entry: &NewEntry) -> Result<()> {
    if entry.label_ids.is_empty() && entry.numeric_value.is_none() {
        return Err(HavenError::NothingToSave);
    }
    if let Some(value) = entry.numeric_value {
        if !value.is_finite() || value <= 0.0 {
            return Err(HavenError::InvalidInput(format!(
                "numeric value must be a positive number, got {value}"
            )));
        }
    }
    Ok(())
}

/// Selected labels followed by the single-choice label, first occurrence wins.
fn merged_label_ids(entry: &NewEntry) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(entry.label_ids.len() + 1);
    for id in entry.label_ids.iter().copied().chain(entry.single_choice_label_id) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
