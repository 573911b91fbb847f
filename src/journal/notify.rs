//! Subscribe/notify for derived views.
//!
//! Subscribers hold `tokio::sync::watch` receivers. Writers call the matching
//! `refresh_*` after each successful commit, which re-runs the query and
//! publishes only when the value changed. Watchers whose receivers were all
//! dropped are pruned on the next refresh.

use rusqlite::Connection;
use std::sync::Mutex;
use tokio::sync::watch;

use super::queries::{daily_total, enabled_entry_types};
use super::types::EntryType;
use crate::error::{HavenError, Result};

struct DailyTotalWatch {
    entry_type_id: i64,
    day_start: String,
    day_end: String,
    sender: watch::Sender<f64>,
}

pub struct Subscriptions {
    entry_types: watch::Sender<Vec<EntryType>>,
    daily_totals: Mutex<Vec<DailyTotalWatch>>,
}

impl Default for Subscriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriptions {
    pub fn new() -> Self {
        let (entry_types, _) = watch::channel(Vec::new());
        Self { entry_types, daily_totals: Mutex::new(Vec::new()) }
    }

    /// Receiver for enabled entry types; holds the last published list.
    pub fn subscribe_entry_types(&self) -> watch::Receiver<Vec<EntryType>> {
        self.entry_types.subscribe()
    }

    /// Watch the numeric total of `entry_type_id` within `[day_start, day_end]`.
    /// The receiver starts with the current total.
    pub fn subscribe_daily_total(
        &self,
        conn: &Connection,
        entry_type_id: i64,
        day_start: String,
        day_end: String,
    ) -> Result<watch::Receiver<f64>> {
        let initial = daily_total(conn, entry_type_id, &day_start, &day_end)?;
        let (sender, receiver) = watch::channel(initial);
        self.lock_totals()?.push(DailyTotalWatch { entry_type_id, day_start, day_end, sender });
        Ok(receiver)
    }

    pub fn refresh_entry_types(&self, conn: &Connection) -> Result<()> {
        let types = enabled_entry_types(conn)?;
        self.entry_types.send_if_modified(|current| {
            if *current == types {
                return false;
            }
            *current = types;
            true
        });
        Ok(())
    }

    pub fn refresh_daily_totals(&self, conn: &Connection) -> Result<()> {
        let mut watches = self.lock_totals()?;
        watches.retain(|w| !w.sender.is_closed());
        for w in watches.iter() {
            let total = daily_total(conn, w.entry_type_id, &w.day_start, &w.day_end)?;
            w.sender.send_if_modified(|current| {
                if *current == total {
                    return false;
                }
                *current = total;
                true
            });
        }
        tracing::debug!(watchers = watches.len(), "daily totals refreshed");
        Ok(())
    }

    /// Number of live daily-total watchers.
    pub fn daily_total_watchers(&self) -> usize {
        self.daily_totals
            .lock()
            .map(|w| w.iter().filter(|w| !w.sender.is_closed()).count())
            .unwrap_or(0)
    }

    fn lock_totals(&self) -> Result<std::sync::MutexGuard<'_, Vec<DailyTotalWatch>>> {
        self.daily_totals
            .lock()
            .map_err(|e| HavenError::Internal(format!("subscription lock poisoned: {e}")))
    }
}
