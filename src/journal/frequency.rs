//! Hour-of-day label frequency.
//!
//! Counts how often each label was attached to entries of one type within an
//! hour window. Windows that cross midnight (`hour_start >= hour_end`) are
//! answered by two half-window queries merged in memory; each half is already
//! truncated to `limit`, so the merged ranking is an approximation of the
//! true top-K, accepted because suggestion lists are short.

use rusqlite::{params, Connection};
use std::collections::HashMap;

use super::types::LabelFrequency;
use crate::error::{HavenError, Result};

const COUNT_SQL: &str = "\
    SELECT el.label_id, COUNT(*) AS uses \
    FROM entry_label el \
    JOIN entry e ON e.id = el.entry_id \
    WHERE e.entry_type_id = ?1 \
      AND CAST(substr(e.timestamp, 12, 2) AS INTEGER) >= ?2 \
      AND CAST(substr(e.timestamp, 12, 2) AS INTEGER) < ?3 \
    GROUP BY el.label_id \
    ORDER BY uses DESC, el.label_id ASC \
    LIMIT ?4";

/// Most-used labels for `entry_type_id` with local hour in `[hour_start, hour_end)`,
/// wrapping past midnight when `hour_start >= hour_end`.
pub fn label_frequency(
    conn: &Connection,
    entry_type_id: i64,
    hour_start: u32,
    hour_end: u32,
    limit: usize,
) -> Result<Vec<LabelFrequency>> {
    if hour_start >= 24 || hour_end > 24 {
        return Err(HavenError::InvalidInput(format!(
            "hour window [{hour_start}, {hour_end}) is outside 0..24"
        )));
    }
    if limit == 0 {
        return Ok(Vec::new());
    }

    if hour_start < hour_end {
        return count_window(conn, entry_type_id, hour_start, hour_end, limit);
    }

    let late = count_window(conn, entry_type_id, hour_start, 24, limit)?;
    let early = count_window(conn, entry_type_id, 0, hour_end, limit)?;
    tracing::debug!(
        entry_type_id,
        hour_start,
        hour_end,
        late = late.len(),
        early = early.len(),
        "merging wrapped window"
    );
    Ok(merge_counts(late, early, limit))
}

fn count_window(
    conn: &Connection,
    entry_type_id: i64,
    hour_start: u32,
    hour_end: u32,
    limit: usize,
) -> Result<Vec<LabelFrequency>> {
    let mut stmt = conn.prepare_cached(COUNT_SQL)?;
    let rows = stmt
        .query_map(params![entry_type_id, hour_start, hour_end, limit as i64], |row| {
            Ok(LabelFrequency { label_id: row.get(0)?, count: row.get(1)? })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Sum counts per label across both halves, keep first-seen order for ties,
/// then rank descending and truncate.
fn merge_counts(first: Vec<LabelFrequency>, second: Vec<LabelFrequency>, limit: usize) -> Vec<LabelFrequency> {
    let mut merged: Vec<LabelFrequency> = Vec::with_capacity(first.len() + second.len());
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in first.into_iter().chain(second) {
        match index.get(&row.label_id) {
            Some(&i) => merged[i].count += row.count,
            None => {
                index.insert(row.label_id, merged.len());
                merged.push(row);
            }
        }
    }

    merged.sort_by(|a, b| b.count.cmp(&a.count));
    merged.truncate(limit);
    merged
}
