//! Async facade over the synchronous core.
//!
//! [`Haven`] owns the shared connection, the subscription registry and the
//! config. Every operation runs to completion on a blocking worker thread via
//! `tokio::task::spawn_blocking`; callers on the async runtime never touch
//! SQLite directly. Writes refresh the subscriptions that depend on them
//! before returning.

use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, TryLockError};
use tokio::sync::watch;

use crate::config::HavenConfig;
use crate::db;
use crate::error::{HavenError, Result};
use crate::journal::feed::{DayGroup, EntryFeed, PageSource};
use crate::journal::notify::Subscriptions;
use crate::journal::time::day_bounds;
use crate::journal::types::{EntryType, EntryWithDetails, Label, LabelFrequency, NewEntry};
use crate::journal::{frequency, labeling, queries, store};
use crate::seed::{self, data, FileVersionStore, SeedVersionStore};

/// Connection handle shared between the facade and feed instances.
#[derive(Clone)]
pub struct SharedDb(Arc<Mutex<Connection>>);

impl SharedDb {
    pub fn new(conn: Connection) -> Self {
        Self(Arc::new(Mutex::new(conn)))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.0
            .lock()
            .map_err(|e| HavenError::Internal(format!("db lock poisoned: {e}")))
    }
}

impl PageSource for SharedDb {
    fn fetch_page(
        &self,
        entry_type_id: Option<i64>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<EntryWithDetails>> {
        let conn = self.lock()?;
        queries::entries_page(&conn, entry_type_id, limit, offset)
    }
}

#[derive(Clone)]
pub struct Haven {
    db: SharedDb,
    subscriptions: Arc<Subscriptions>,
    config: Arc<HavenConfig>,
}

impl Haven {
    /// Open the configured database, seed reference data and prime the
    /// entry-type subscription.
    pub fn open(config: HavenConfig) -> anyhow::Result<Self> {
        let conn = db::open_database(config.resolved_db_path())?;
        let store = FileVersionStore::new(config.resolved_seed_state_path());
        Ok(Self::from_connection(conn, &store, config)?)
    }

    /// Wrap an already-open connection. Seeds using `store` first.
    pub fn from_connection(
        mut conn: Connection,
        store: &dyn SeedVersionStore,
        config: HavenConfig,
    ) -> Result<Self> {
        let version = seed::seed_on_open(&mut conn, &data::SEED, store)?;
        let subscriptions = Subscriptions::new();
        subscriptions.refresh_entry_types(&conn)?;
        tracing::info!(seed_version = version, "haven ready");

        Ok(Self {
            db: SharedDb::new(conn),
            subscriptions: Arc::new(subscriptions),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &HavenConfig {
        &self.config
    }

    /// Run `f` against the connection on a blocking worker thread.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection, &Subscriptions) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let subscriptions = Arc::clone(&self.subscriptions);
        tokio::task::spawn_blocking(move || {
            let mut conn = db.lock()?;
            f(&mut *conn, &subscriptions)
        })
        .await
        .map_err(|e| HavenError::Internal(format!("db task failed: {e}")))?
    }

    pub fn subscribe_entry_types(&self) -> watch::Receiver<Vec<EntryType>> {
        self.subscriptions.subscribe_entry_types()
    }

    /// Watch the local-day numeric total for `entry_type_id` on `date`.
    pub async fn subscribe_daily_total(&self, entry_type_id: i64, date: NaiveDate) -> Result<watch::Receiver<f64>> {
        let (start, end) = local_day_bounds(date)?;
        self.with_conn(move |conn, subs| subs.subscribe_daily_total(conn, entry_type_id, start, end))
            .await
    }

    pub async fn enabled_entry_types(&self) -> Result<Vec<EntryType>> {
        self.with_conn(|conn, _| queries::enabled_entry_types(conn)).await
    }

    pub async fn entry_type_by_name(&self, name: &str) -> Result<EntryType> {
        let name = name.to_string();
        self.with_conn(move |conn, _| {
            queries::entry_type_by_name(conn, &name)?
                .ok_or_else(|| HavenError::NotFound(format!("entry type '{name}'")))
        })
        .await
    }

    pub async fn labels_for_entry_type(&self, entry_type_id: i64) -> Result<Vec<Label>> {
        self.with_conn(move |conn, _| queries::labels_for_entry_type(conn, entry_type_id))
            .await
    }

    pub async fn entry(&self, entry_id: i64) -> Result<EntryWithDetails> {
        self.with_conn(move |conn, _| {
            queries::entry_by_id(conn, entry_id)?.ok_or_else(|| HavenError::NotFound(format!("entry {entry_id}")))
        })
        .await
    }

    /// Save an entry, then refresh daily-total watchers.
    pub async fn save_entry(&self, entry: NewEntry) -> Result<i64> {
        self.with_conn(move |conn, subs| {
            let id = store::save_entry(conn, &entry)?;
            subs.refresh_daily_totals(conn)?;
            Ok(id)
        })
        .await
    }

    pub async fn set_entry_type_enabled(&self, entry_type_id: i64, enabled: bool) -> Result<()> {
        self.with_conn(move |conn, subs| {
            store::set_entry_type_enabled(conn, entry_type_id, enabled)?;
            subs.refresh_entry_types(conn)
        })
        .await
    }

    /// Suggestions for `hour` using the configured limit and single-choice group.
    pub async fn suggest_labels(&self, entry_type_id: i64, hour: u32) -> Result<Vec<Label>> {
        let limit = self.config.suggestions.limit;
        let group = self.config.suggestions.single_choice_group.clone();
        self.with_conn(move |conn, _| labeling::suggest_labels(conn, entry_type_id, hour, limit, &group))
            .await
    }

    pub async fn label_frequency(
        &self,
        entry_type_id: i64,
        hour_start: u32,
        hour_end: u32,
        limit: usize,
    ) -> Result<Vec<LabelFrequency>> {
        self.with_conn(move |conn, _| frequency::label_frequency(conn, entry_type_id, hour_start, hour_end, limit))
            .await
    }

    pub async fn daily_total(&self, entry_type_id: i64, date: NaiveDate) -> Result<f64> {
        let (start, end) = local_day_bounds(date)?;
        self.with_conn(move |conn, _| queries::daily_total(conn, entry_type_id, &start, &end))
            .await
    }

    /// A fresh feed using the configured page size and threshold.
    pub fn feed(&self) -> FeedHandle {
        let feed = EntryFeed::new(
            self.db.clone(),
            self.config.feed.page_size,
            self.config.feed.load_more_threshold,
        );
        FeedHandle { inner: Arc::new(Mutex::new(feed)) }
    }
}

fn local_day_bounds(date: NaiveDate) -> Result<(String, String)> {
    day_bounds(date, &Local).ok_or_else(|| HavenError::InvalidInput(format!("{date} has no local midnight")))
}

/// Point-in-time copy of a feed's visible state.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub selected_entry_type_id: Option<i64>,
    pub groups: Vec<DayGroup>,
    pub total_entries: usize,
    pub has_more: bool,
}

impl FeedSnapshot {
    fn of<S: PageSource>(feed: &EntryFeed<S>) -> Self {
        Self {
            selected_entry_type_id: feed.selected_entry_type_id(),
            groups: feed.groups().to_vec(),
            total_entries: feed.entries().len(),
            has_more: feed.has_more(),
        }
    }
}

/// Shareable handle to one feed. Operations run on a blocking worker.
#[derive(Clone)]
pub struct FeedHandle {
    inner: Arc<Mutex<EntryFeed<SharedDb>>>,
}

impl FeedHandle {
    async fn run<F>(&self, f: F) -> Result<FeedSnapshot>
    where
        F: FnOnce(&mut EntryFeed<SharedDb>) -> Result<()> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut feed = inner
                .lock()
                .map_err(|e| HavenError::Internal(format!("feed lock poisoned: {e}")))?;
            f(&mut *feed)?;
            Ok(FeedSnapshot::of(&*feed))
        })
        .await
        .map_err(|e| HavenError::Internal(format!("feed task failed: {e}")))?
    }

    pub async fn load_initial(&self) -> Result<FeedSnapshot> {
        self.run(|feed| feed.load_initial()).await
    }

    pub async fn select_filter(&self, entry_type_id: Option<i64>) -> Result<FeedSnapshot> {
        self.run(move |feed| feed.select_filter(entry_type_id)).await
    }

    /// Fetch the next page. Returns `None` without fetching when another feed
    /// operation is still running.
    pub async fn load_more(&self) -> Result<Option<FeedSnapshot>> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut feed = match inner.try_lock() {
                Ok(feed) => feed,
                Err(TryLockError::WouldBlock) => {
                    tracing::debug!("load_more dropped, feed busy");
                    return Ok(None);
                }
                Err(TryLockError::Poisoned(e)) => {
                    return Err(HavenError::Internal(format!("feed lock poisoned: {e}")));
                }
            };
            feed.load_more()?;
            Ok(Some(FeedSnapshot::of(&*feed)))
        })
        .await
        .map_err(|e| HavenError::Internal(format!("feed task failed: {e}")))?
    }

    pub fn should_load_more(&self, last_visible_index: usize, total_items: usize) -> bool {
        match self.inner.try_lock() {
            Ok(feed) => feed.should_load_more(last_visible_index, total_items),
            Err(_) => false,
        }
    }
}
