//! Version-gated reference-data seeding.
//!
//! [`apply_seed`] takes the last applied seed version and returns the new one.
//! Rows introduced after the applied version are written with
//! `INSERT OR IGNORE` inside a single IMMEDIATE transaction, in foreign-key
//! order, so a re-run after a crash only repeats ignored inserts.
//! [`seed_on_open`] wraps it with a [`SeedVersionStore`] for the check-then-act
//! cycle performed every time the store is opened.

pub mod data;
pub mod rows;
pub mod state;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::sync::Mutex;

use crate::error::{HavenError, Result};
use rows::{
    CategorySeed, EntryTypeSeed, LabelSeed, LabelTagSeed, MeasurementKindSeed, SeedRow, TagSeed,
};
pub use state::{FileVersionStore, MemoryVersionStore, SeedVersionStore};

/// Serializes seed runs within this process. Cross-process openers are
/// serialized by the IMMEDIATE transaction.
static SEED_LOCK: Mutex<()> = Mutex::new(());

/// One reference-data release: every table's rows plus the release number.
///
/// Rows tagged with a seed version above `version` are not part of the
/// release and are never written.
#[derive(Debug, Clone, Copy)]
pub struct SeedSet<'a> {
    pub version: u32,
    pub measurement_kinds: &'a [MeasurementKindSeed],
    pub categories: &'a [CategorySeed],
    pub entry_types: &'a [EntryTypeSeed],
    pub labels: &'a [LabelSeed],
    pub tags: &'a [TagSeed],
    pub label_tags: &'a [LabelTagSeed],
}

/// Bring the reference tables from `applied_version` up to `seed.version`.
///
/// Returns the version the caller should persist. When `applied_version` is
/// already at or past the release this returns immediately without touching
/// the database.
pub fn apply_seed(conn: &mut Connection, seed: &SeedSet<'_>, applied_version: u32) -> Result<u32> {
    if applied_version >= seed.version {
        tracing::debug!(applied_version, release = seed.version, "seed up to date");
        return Ok(applied_version);
    }

    tracing::info!(from = applied_version, to = seed.version, "applying seed");

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let baseline = applied_version;
    let target = seed.version;

    let inserted = insert_rows(&tx, seed.measurement_kinds, baseline, target)?
        + insert_rows(&tx, seed.categories, baseline, target)?
        + insert_rows(&tx, seed.entry_types, baseline, target)?
        + insert_rows(&tx, seed.labels, baseline, target)?
        + insert_rows(&tx, seed.tags, baseline, target)?
        + insert_rows(&tx, seed.label_tags, baseline, target)?;

    check_label_parents(&tx)?;
    tx.commit()?;

    tracing::info!(version = target, inserted, "seed applied");
    Ok(target)
}

/// Load the applied version, apply the seed, and persist the result.
///
/// The version is only persisted after the transaction commits; a failure
/// leaves the stored version untouched so the next open retries.
pub fn seed_on_open(
    conn: &mut Connection,
    seed: &SeedSet<'_>,
    store: &dyn SeedVersionStore,
) -> Result<u32> {
    let _guard = SEED_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let applied = store.load()?;
    let new_version = apply_seed(conn, seed, applied)?;
    if new_version != applied {
        store.store(new_version)?;
    }
    Ok(new_version)
}

/// Insert every row with `baseline < seed_version <= target` into `T::TABLE`,
/// skipping rows whose primary key already exists.
fn insert_rows<T: SeedRow>(tx: &Transaction<'_>, rows: &[T], baseline: u32, target: u32) -> Result<usize> {
    let placeholders = (1..=T::COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT OR IGNORE INTO {} ({}) VALUES ({placeholders})",
        T::TABLE,
        T::COLUMNS.join(", ")
    );

    let mut stmt = tx.prepare(&sql)?;
    let mut inserted = 0;
    for row in rows
        .iter()
        .filter(|r| r.seed_version() > baseline && r.seed_version() <= target)
    {
        inserted += row.execute(&mut stmt)?;
    }

    tracing::debug!(table = T::TABLE, inserted, "seeded table");
    Ok(inserted)
}

/// Foreign keys cannot express "parent has the same entry type"; check it here
/// so a bad release aborts instead of committing a cross-type tree.
fn check_label_parents(tx: &Transaction<'_>) -> Result<()> {
    let mismatched: i64 = tx.query_row(
        "SELECT COUNT(*) FROM label c JOIN label p ON c.parent_id = p.id \
         WHERE c.entry_type_id != p.entry_type_id",
        [],
        |row| row.get(0),
    )?;
    if mismatched > 0 {
        return Err(HavenError::InvalidInput(format!(
            "{mismatched} label(s) have a parent from a different entry type"
        )));
    }
    Ok(())
}
