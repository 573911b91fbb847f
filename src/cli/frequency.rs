use anyhow::Result;
use std::collections::HashMap;

use haven::service::Haven;

/// Print raw label counts for an hour window.
pub async fn frequency(haven: &Haven, type_name: &str, start: u32, end: u32, limit: usize) -> Result<()> {
    let entry_type = super::entry_type(haven, type_name).await?;
    let rows = haven.label_frequency(entry_type.id, start, end, limit).await?;
    let names: HashMap<i64, String> = haven
        .labels_for_entry_type(entry_type.id)
        .await?
        .into_iter()
        .map(|l| (l.id, l.name))
        .collect();

    let wraps = if start >= end { " (wraps midnight)" } else { "" };
    println!("{} label frequency, {start:02}:00-{end:02}:00{wraps}", entry_type.name);
    println!("{}", "=".repeat(40));
    for row in &rows {
        let name = names.get(&row.label_id).map(String::as_str).unwrap_or("(disabled)");
        println!("  {:<24} {}", name, row.count);
    }
    if rows.is_empty() {
        println!("  (no entries in window)");
    }
    Ok(())
}
