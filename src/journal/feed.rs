//! Paginated, day-grouped entry feed.
//!
//! [`EntryFeed`] accumulates pages of entries newest-first from a
//! [`PageSource`] and regroups the whole accumulation by calendar day in the
//! viewer's time zone after every successful fetch.

use chrono::{Local, NaiveDate, TimeZone};
use rusqlite::Connection;
use std::collections::BTreeMap;

use super::queries;
use super::time::local_date;
use super::types::EntryWithDetails;
use crate::error::Result;

/// Supplies feed pages ordered by timestamp descending.
pub trait PageSource {
    fn fetch_page(
        &self,
        entry_type_id: Option<i64>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<EntryWithDetails>>;
}

impl PageSource for Connection {
    fn fetch_page(
        &self,
        entry_type_id: Option<i64>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<EntryWithDetails>> {
        queries::entries_page(self, entry_type_id, limit, offset)
    }
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch_page(
        &self,
        entry_type_id: Option<i64>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<EntryWithDetails>> {
        (**self).fetch_page(entry_type_id, limit, offset)
    }
}

/// Entries sharing one local calendar date, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<EntryWithDetails>,
}

impl DayGroup {
    pub fn label(&self, today: NaiveDate) -> String {
        day_label(self.date, today)
    }
}

/// "Today", "Yesterday", or e.g. "Friday, February 13".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%A, %B %-d").to_string()
    }
}

pub struct EntryFeed<S, Tz: TimeZone = Local> {
    source: S,
    tz: Tz,
    page_size: usize,
    load_more_threshold: usize,
    selected_entry_type_id: Option<i64>,
    entries: Vec<EntryWithDetails>,
    groups: Vec<DayGroup>,
    offset: usize,
    has_more: bool,
    is_loading: bool,
}

impl<S: PageSource> EntryFeed<S, Local> {
    pub fn new(source: S, page_size: usize, load_more_threshold: usize) -> Self {
        Self::with_time_zone(source, Local, page_size, load_more_threshold)
    }
}

impl<S: PageSource, Tz: TimeZone> EntryFeed<S, Tz> {
    pub fn with_time_zone(source: S, tz: Tz, page_size: usize, load_more_threshold: usize) -> Self {
        Self {
            source,
            tz,
            page_size: page_size.max(1),
            load_more_threshold,
            selected_entry_type_id: None,
            entries: Vec::new(),
            groups: Vec::new(),
            offset: 0,
            has_more: true,
            is_loading: false,
        }
    }

    /// Replace the accumulation with the first page under the current filter.
    ///
    /// On error the previous accumulation is kept.
    pub fn load_initial(&mut self) -> Result<()> {
        let page = self.fetch(0)?;

        self.has_more = page.len() >= self.page_size;
        self.offset = self.page_size;
        self.entries = page;
        self.regroup();

        tracing::debug!(
            entry_type_id = ?self.selected_entry_type_id,
            loaded = self.entries.len(),
            has_more = self.has_more,
            "feed loaded"
        );
        Ok(())
    }

    /// Append the next page. No-op while loading or once exhausted.
    pub fn load_more(&mut self) -> Result<()> {
        if self.is_loading || !self.has_more {
            return Ok(());
        }

        let page = self.fetch(self.offset)?;
        if page.is_empty() {
            self.has_more = false;
            return Ok(());
        }

        self.has_more = page.len() >= self.page_size;
        self.offset += self.page_size;
        self.entries.extend(page);
        self.regroup();

        tracing::debug!(
            offset = self.offset,
            loaded = self.entries.len(),
            has_more = self.has_more,
            "feed page appended"
        );
        Ok(())
    }

    /// Switch the entry-type filter and reload. Selecting the current filter
    /// does nothing.
    pub fn select_filter(&mut self, entry_type_id: Option<i64>) -> Result<()> {
        if self.selected_entry_type_id == entry_type_id {
            return Ok(());
        }
        self.selected_entry_type_id = entry_type_id;
        self.entries.clear();
        self.groups.clear();
        self.offset = 0;
        self.has_more = true;
        self.load_initial()
    }

    /// Whether a view showing `last_visible_index` of `total_items` should
    /// trigger [`EntryFeed::load_more`].
    pub fn should_load_more(&self, last_visible_index: usize, total_items: usize) -> bool {
        last_visible_index + self.load_more_threshold >= total_items && self.has_more && !self.is_loading
    }

    pub fn entries(&self) -> &[EntryWithDetails] {
        &self.entries
    }

    pub fn groups(&self) -> &[DayGroup] {
        &self.groups
    }

    pub fn selected_entry_type_id(&self) -> Option<i64> {
        self.selected_entry_type_id
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn fetch(&mut self, offset: usize) -> Result<Vec<EntryWithDetails>> {
        self.is_loading = true;
        let result = self
            .source
            .fetch_page(self.selected_entry_type_id, self.page_size, offset);
        self.is_loading = false;
        if let Err(e) = &result {
            tracing::warn!(offset, error = %e, "feed fetch failed");
        }
        result
    }

    fn regroup(&mut self) {
        self.groups = group_by_day(&self.entries, &self.tz);
    }
}

/// Group by local date: days newest first, entries within a day oldest first.
pub fn group_by_day<Tz: TimeZone>(entries: &[EntryWithDetails], tz: &Tz) -> Vec<DayGroup> {
    let mut by_day: BTreeMap<NaiveDate, Vec<EntryWithDetails>> = BTreeMap::new();
    for entry in entries {
        match local_date(&entry.timestamp, tz) {
            Some(date) => by_day.entry(date).or_default().push(entry.clone()),
            None => {
                tracing::warn!(entry_id = entry.id, timestamp = %entry.timestamp, "skipping entry with unparseable timestamp")
            }
        }
    }

    by_day
        .into_iter()
        .rev()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            DayGroup { date, entries }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: i64, timestamp: &str) -> EntryWithDetails {
        EntryWithDetails {
            id,
            entry_type_id: 1,
            entry_type_name: "Food".into(),
            entry_type_icon: Some("food".into()),
            source_type: "log".into(),
            timestamp: timestamp.into(),
            created_at: timestamp.into(),
            numeric_value: None,
            notes: None,
            label_names: None,
        }
    }

    #[test]
    fn day_labels() {
        let today = date(2026, 2, 14);
        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(date(2026, 2, 13), today), "Yesterday");
        assert_eq!(day_label(date(2026, 2, 12), today), "Thursday, February 12");
        assert_eq!(day_label(date(2026, 3, 1), date(2026, 3, 2)), "Yesterday");
    }

    #[test]
    fn grouping_orders_days_descending_and_entries_ascending() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let entries = [
            entry(1, "2026-02-14T08:00"),
            entry(2, "2026-02-14T07:30"),
            entry(3, "2026-02-13T12:00"),
        ];

        let groups = group_by_day(&entries, &tz);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date(2026, 2, 14));
        let ids: Vec<i64> = groups[0].entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 1]);
        assert_eq!(groups[1].date, date(2026, 2, 13));
        assert_eq!(groups[1].label(date(2026, 2, 14)), "Yesterday");
    }

    #[test]
    fn unparseable_timestamps_are_skipped() {
        let groups = group_by_day(&[entry(1, "garbage"), entry(2, "2026-02-14T08:00:00-05:00")], &FixedOffset::east_opt(0).unwrap());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries[0].id, 2);
    }

    #[test]
    fn proximity_trigger_respects_threshold() {
        let conn = crate::db::open_memory_database().unwrap();
        let feed = EntryFeed::new(&conn, 50, 5);
        assert!(!feed.should_load_more(10, 50));
        assert!(feed.should_load_more(45, 50));
        assert!(feed.should_load_more(49, 50));
    }
}
