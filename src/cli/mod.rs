pub mod doctor;
pub mod frequency;
pub mod labels;
pub mod log;
pub mod seed;
pub mod stats;
pub mod suggest;
pub mod total;
pub mod trace;
pub mod types;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use haven::journal::types::{EntryType, Label};
use haven::service::Haven;

/// Resolve an entry type by name (case-insensitive).
pub async fn entry_type(haven: &Haven, name: &str) -> Result<EntryType> {
    haven
        .entry_type_by_name(name)
        .await
        .with_context(|| format!("unknown entry type '{name}' (see `haven types`)"))
}

/// Find a label by exact name, ignoring case.
pub fn find_label<'a>(labels: &'a [Label], name: &str) -> Result<&'a Label> {
    match labels.iter().find(|l| l.name.eq_ignore_ascii_case(name)) {
        Some(label) => Ok(label),
        None => bail!("no label named '{name}'"),
    }
}

/// Parse `YYYY-MM-DD`, defaulting to today.
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{d}', expected YYYY-MM-DD")),
        None => Ok(Local::now().date_naive()),
    }
}

/// Whole numbers without a fraction, otherwise as-is.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
