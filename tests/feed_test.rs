mod helpers;

use chrono::{FixedOffset, NaiveDate};
use haven::error::{HavenError, Result};
use haven::journal::feed::{EntryFeed, PageSource};
use haven::journal::types::EntryWithDetails;
use haven::seed::data;
use rusqlite::Connection;
use std::cell::Cell;

/// Wraps the real store, counting fetches and optionally failing them.
struct CountingSource {
    conn: Connection,
    fetches: Cell<usize>,
    fail: Cell<bool>,
}

impl CountingSource {
    fn new(conn: Connection) -> Self {
        Self { conn, fetches: Cell::new(0), fail: Cell::new(false) }
    }
}

impl PageSource for CountingSource {
    fn fetch_page(&self, entry_type_id: Option<i64>, limit: usize, offset: usize) -> Result<Vec<EntryWithDetails>> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail.get() {
            return Err(HavenError::Internal("disk on fire".into()));
        }
        self.conn.fetch_page(entry_type_id, limit, offset)
    }
}

fn est() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

fn feed_with(conn: Connection, page_size: usize) -> EntryFeed<CountingSource, FixedOffset> {
    EntryFeed::with_time_zone(CountingSource::new(conn), est(), page_size, 5)
}

fn sleep_entries(conn: &Connection, n: usize) {
    for i in 0..n {
        helpers::insert_entry(conn, data::SLEEP, &format!("2026-02-{:02}T07:00:00-05:00", i + 1), &[]);
    }
}

#[test]
fn exact_page_size_exhausts_after_one_empty_fetch() {
    let conn = helpers::seeded_db();
    sleep_entries(&conn, 3);
    let mut feed = feed_with(conn, 3);

    feed.load_initial().unwrap();
    assert_eq!(feed.entries().len(), 3);
    assert!(feed.has_more());
    assert_eq!(feed.offset(), 3);

    feed.load_more().unwrap();
    assert!(!feed.has_more());
    assert_eq!(feed.entries().len(), 3);
    assert_eq!(feed.offset(), 3);
    assert_eq!(feed.source().fetches.get(), 2);

    // Exhausted: no further fetches.
    feed.load_more().unwrap();
    assert_eq!(feed.source().fetches.get(), 2);
}

#[test]
fn pages_accumulate_until_a_short_page() {
    let conn = helpers::seeded_db();
    sleep_entries(&conn, 5);
    let mut feed = feed_with(conn, 2);

    feed.load_initial().unwrap();
    feed.load_more().unwrap();
    assert_eq!(feed.entries().len(), 4);
    assert!(feed.has_more());

    feed.load_more().unwrap();
    assert_eq!(feed.entries().len(), 5);
    assert!(!feed.has_more());

    let stamps: Vec<&str> = feed.entries().iter().map(|e| e.timestamp.as_str()).collect();
    let mut sorted = stamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted, "accumulation stays newest first");
}

#[test]
fn groups_by_local_day() {
    let conn = helpers::seeded_db();
    let late = helpers::insert_entry(&conn, data::FOOD, "2026-02-14T08:00", &[1]);
    let early = helpers::insert_entry(&conn, data::FOOD, "2026-02-14T07:30", &[2]);
    let prior = helpers::insert_entry(&conn, data::FOOD, "2026-02-13T12:00", &[3]);
    let mut feed = feed_with(conn, 50);

    feed.load_initial().unwrap();

    let groups = feed.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
    let ids: Vec<i64> = groups[0].entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, [early, late]);
    assert_eq!(groups[1].entries[0].id, prior);

    let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
    assert_eq!(groups[0].label(today), "Today");
    assert_eq!(groups[1].label(today), "Yesterday");
    assert_eq!(
        groups[1].label(NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()),
        "Friday, February 13"
    );
}

#[test]
fn regroup_covers_every_loaded_page() {
    let conn = helpers::seeded_db();
    for hour in [6, 9, 12, 15] {
        helpers::insert_entry(&conn, data::FOOD, &format!("2026-02-14T{hour:02}:00:00-05:00"), &[1]);
    }
    let mut feed = feed_with(conn, 2);

    feed.load_initial().unwrap();
    assert_eq!(feed.groups()[0].entries.len(), 2);
    feed.load_more().unwrap();

    assert_eq!(feed.groups().len(), 1);
    let hours: Vec<&str> = feed.groups()[0].entries.iter().map(|e| &e.timestamp[11..13]).collect();
    assert_eq!(hours, ["06", "09", "12", "15"]);
}

#[test]
fn selecting_the_current_filter_does_not_fetch() {
    let conn = helpers::seeded_db();
    sleep_entries(&conn, 2);
    helpers::insert_entry(&conn, data::FOOD, "2026-02-10T12:00:00-05:00", &[1]);
    let mut feed = feed_with(conn, 50);

    feed.load_initial().unwrap();
    assert_eq!(feed.source().fetches.get(), 1);

    feed.select_filter(None).unwrap();
    assert_eq!(feed.source().fetches.get(), 1);

    feed.select_filter(Some(data::SLEEP)).unwrap();
    assert_eq!(feed.source().fetches.get(), 2);
    assert_eq!(feed.entries().len(), 2);
    assert!(feed.entries().iter().all(|e| e.entry_type_id == data::SLEEP));

    feed.select_filter(Some(data::SLEEP)).unwrap();
    assert_eq!(feed.source().fetches.get(), 2);

    feed.select_filter(None).unwrap();
    assert_eq!(feed.entries().len(), 3);
}

#[test]
fn failed_fetch_keeps_accumulation() {
    let conn = helpers::seeded_db();
    sleep_entries(&conn, 4);
    let mut feed = feed_with(conn, 2);
    feed.load_initial().unwrap();

    feed.source().fail.set(true);
    assert!(feed.load_more().is_err());

    assert_eq!(feed.entries().len(), 2);
    assert_eq!(feed.offset(), 2);
    assert!(feed.has_more());
    assert!(!feed.is_loading());

    feed.source().fail.set(false);
    feed.load_more().unwrap();
    assert_eq!(feed.entries().len(), 4);
}

#[test]
fn proximity_trigger_stops_once_exhausted() {
    let conn = helpers::seeded_db();
    sleep_entries(&conn, 1);
    let mut feed = feed_with(conn, 50);
    assert!(feed.should_load_more(0, 0));

    feed.load_initial().unwrap();
    assert!(!feed.has_more());
    assert!(!feed.should_load_more(0, 1));
}
